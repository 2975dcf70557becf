// src/data_analysis/bounds.rs

use nalgebra::Vector3;
use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::data_input::log_data::RunDataset;
use crate::types::TrajError;

/// Explicit axis-bound overrides, usually straight from the command line.
/// `Some` suppresses inference for that bound entirely, zero included.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundOverrides {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
    pub dmin: Option<f64>,
    pub dmax: Option<f64>,
    pub vmax: Option<f64>,
    pub ymax: Option<f64>,
    pub accelmax: Option<f64>,
    pub emax: Option<f64>,
}

/// Resolved axis bounds for the overview figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub tmin: f64,
    pub tmax: f64,
    pub dmin: f64,
    pub dmax: f64,
    pub vmax: f64,
    pub ymax: f64,
    pub accelmax: f64,
    pub emax: f64,
}

impl PlotBounds {
    /// Fills every bound the caller did not supply with the pooled min or
    /// max of its field across all runs. Overridden bounds skip the field
    /// scan and come back exactly as given, so an override also silences
    /// any missing-field complaint for that axis.
    pub fn resolve(overrides: &BoundOverrides, runs: &[RunDataset]) -> Result<PlotBounds, TrajError> {
        Ok(PlotBounds {
            tmin: match overrides.tmin {
                Some(v) => v,
                None => pooled_min(runs, "time")?,
            },
            tmax: match overrides.tmax {
                Some(v) => v,
                None => pooled_max(runs, "time")?,
            },
            dmin: match overrides.dmin {
                Some(v) => v,
                None => pooled_min(runs, "downrange")?,
            },
            dmax: match overrides.dmax {
                Some(v) => v,
                None => pooled_max(runs, "downrange")?,
            },
            vmax: match overrides.vmax {
                Some(v) => v,
                None => pooled_max(runs, "velocity")?,
            },
            ymax: match overrides.ymax {
                Some(v) => v,
                None => pooled_max(runs, "y")?,
            },
            accelmax: match overrides.accelmax {
                Some(v) => v,
                None => pooled_max(runs, "mag_accel")?,
            },
            emax: match overrides.emax {
                Some(v) => v,
                None => pooled_max(runs, "target_error")?,
            },
        })
    }
}

/// Unit projection basis for downrange distance: the first record of the
/// first run's horizontal position (x, 0, z), normalized. Later files are
/// measured against the same direction, which is what makes multi-run
/// downrange curves comparable.
pub fn reference_direction(runs: &[RunDataset]) -> Result<Vector3<f64>, TrajError> {
    let first_run = runs
        .first()
        .ok_or_else(|| TrajError::EmptyDataset("<no input>".to_string()))?;
    let record = first_run
        .records
        .first()
        .ok_or_else(|| TrajError::EmptyDataset(first_run.label.clone()))?;
    let x = record
        .x
        .ok_or_else(|| TrajError::MissingField("x".to_string()))?;
    let z = record
        .z
        .ok_or_else(|| TrajError::MissingField("z".to_string()))?;

    let horizontal = Vector3::new(x, 0.0, z);
    let norm = horizontal.norm();
    if norm <= 0.0 || !norm.is_finite() {
        return Err(TrajError::DegenerateVector);
    }
    Ok(horizontal / norm)
}

/// Every value of `field` across every record of every run. A record where
/// the field is absent or non-numeric fails the whole pool.
fn pooled_values(runs: &[RunDataset], field: &str) -> Result<Array1<f64>, TrajError> {
    let mut values = Vec::new();
    for run in runs {
        for record in &run.records {
            let value = record
                .field(field)
                .ok_or_else(|| TrajError::MissingField(field.to_string()))?;
            values.push(value);
        }
    }
    Ok(Array1::from(values))
}

fn pooled_min(runs: &[RunDataset], field: &str) -> Result<f64, TrajError> {
    let values = pooled_values(runs, field)?;
    values
        .min()
        .map(|v| *v)
        .map_err(|_| TrajError::UndefinedRange(field.to_string()))
}

fn pooled_max(runs: &[RunDataset], field: &str) -> Result<f64, TrajError> {
    let values = pooled_values(runs, field)?;
    values
        .max()
        .map(|v| *v)
        .map_err(|_| TrajError::UndefinedRange(field.to_string()))
}


// src/data_analysis/bounds.rs
