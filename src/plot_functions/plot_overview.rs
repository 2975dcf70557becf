// src/plot_functions/plot_overview.rs

use plotters::style::RGBColor;
use std::error::Error;

use crate::constants::{
    ACCEL_AXIS_HEADROOM, COLOR_BODY_DISC, COLOR_RUN_CYCLE, COLOR_TARGET_CROSS, LINE_WIDTH_PLOT,
    MARK_TIME_WINDOW_S,
};
use crate::data_analysis::bounds::PlotBounds;
use crate::data_input::log_data::{LogRecord, RunDataset};
use crate::data_input::run_metadata::{AccelBound, RunMetadata};
use crate::plot_framework::{
    draw_overview_figure, drawable_range, MarkPoint, OverviewPanels, PanelConfig, PanelCross,
    PanelDisc, PlotSeries,
};
use crate::types::SeriesPoints;

/// Generates the six-pane trajectory overview figure.
///
/// Every run appears in every pane in its cycle color. The acceleration
/// pane additionally carries each run's envelope bounds as dashed overlays;
/// the side view carries the legend, the target body silhouette and the
/// landing-target cross.
pub fn plot_overview(
    runs: &[RunDataset],
    metadata: &RunMetadata,
    bounds: &PlotBounds,
    marktime: Option<f64>,
    root_name: &str,
    save_png: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let output_file_overview = match save_png {
        Some(path) => path.to_string(),
        None => format!("{root_name}_overview.png"),
    };

    let downrange = line_panel(
        runs,
        "time",
        "downrange",
        "Downrange vs Time",
        "Time (s)",
        "Downrange (m)",
        (bounds.tmin, bounds.tmax),
        (bounds.dmin, bounds.dmax),
        marktime,
        false,
    );
    let velocity_time = line_panel(
        runs,
        "time",
        "velocity",
        "Velocity vs Time",
        "Time (s)",
        "Velocity (m/s)",
        (bounds.tmin, bounds.tmax),
        (0.0, bounds.vmax),
        marktime,
        false,
    );
    let velocity_altitude = line_panel(
        runs,
        "y",
        "velocity",
        "Velocity vs Altitude",
        "Altitude (m)",
        "Velocity (m/s)",
        (0.0, bounds.ymax),
        (0.0, bounds.vmax),
        marktime,
        false,
    );

    let mut acceleration = line_panel(
        runs,
        "time",
        "mag_accel",
        "Acceleration vs Time",
        "Time (s)",
        "Acceleration (m/s²)",
        (bounds.tmin, bounds.tmax),
        (0.0, bounds.accelmax * ACCEL_AXIS_HEADROOM),
        marktime,
        false,
    );
    for (index, run) in runs.iter().enumerate() {
        let color = run_color(index);
        if let Some(series) = accel_bound_series(&run.amin, &run.records, color) {
            acceleration.series.push(series);
        }
        if let Some(series) = accel_bound_series(&run.amax, &run.records, color) {
            acceleration.series.push(series);
        }
    }

    let target_error = line_panel(
        runs,
        "time",
        "target_error",
        "Target Error vs Time",
        "Time (s)",
        "Target Error (m)",
        (bounds.tmin, bounds.tmax),
        (0.0, bounds.emax),
        marktime,
        false,
    );

    let mut side_view = line_panel(
        runs,
        "x",
        "y",
        "Trajectory Side View",
        "x (m)",
        "y (m)",
        (bounds.dmin, bounds.dmax),
        (0.0, bounds.ymax),
        marktime,
        true,
    );
    side_view.disc = body_disc(metadata);
    side_view.cross = target_cross(metadata);

    draw_overview_figure(
        &output_file_overview,
        root_name,
        OverviewPanels {
            downrange,
            velocity_time,
            velocity_altitude,
            acceleration,
            target_error,
            side_view,
        },
    )
}

/// Color of the run at `index`; the palette repeats past eight runs.
fn run_color(index: usize) -> RGBColor {
    COLOR_RUN_CYCLE[index % COLOR_RUN_CYCLE.len()]
}

/// (x, y) pairs of two named fields, rows lacking either skipped.
fn series_points(records: &[LogRecord], fx: &str, fy: &str) -> SeriesPoints {
    records
        .iter()
        .filter_map(|r| Some((r.field(fx)?, r.field(fy)?)))
        .collect()
}

/// First record at or after `t` whose time lies within the mark window;
/// a mark time past the end of the run draws nothing.
fn mark_record(records: &[LogRecord], t: f64) -> Option<&LogRecord> {
    records
        .iter()
        .find(|r| matches!(r.time, Some(rt) if rt >= t && rt - t < MARK_TIME_WINDOW_S))
}

fn mark_for(
    records: &[LogRecord],
    fx: &str,
    fy: &str,
    t: f64,
    color: RGBColor,
) -> Option<MarkPoint> {
    let record = mark_record(records, t)?;
    Some(MarkPoint {
        x: record.field(fx)?,
        y: record.field(fy)?,
        color,
    })
}

/// Assembles one pane: a solid line per run in that run's cycle color,
/// plus the mark dot where a mark time is requested and a nearby record
/// exists.
#[allow(clippy::too_many_arguments)]
fn line_panel(
    runs: &[RunDataset],
    fx: &str,
    fy: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    x_bounds: (f64, f64),
    y_bounds: (f64, f64),
    marktime: Option<f64>,
    with_labels: bool,
) -> PanelConfig {
    let mut series = Vec::new();
    let mut markers = Vec::new();
    for (index, run) in runs.iter().enumerate() {
        let color = run_color(index);
        if let Some(t) = marktime {
            if let Some(mark) = mark_for(&run.records, fx, fy, t, color) {
                markers.push(mark);
            }
        }
        series.push(PlotSeries {
            data: series_points(&run.records, fx, fy),
            label: if with_labels {
                run.label.clone()
            } else {
                String::new()
            },
            color,
            stroke_width: LINE_WIDTH_PLOT,
            dashed: false,
        });
    }

    let (x_min, x_max) = drawable_range(x_bounds.0, x_bounds.1);
    let (y_min, y_max) = drawable_range(y_bounds.0, y_bounds.1);
    PanelConfig {
        title: title.to_string(),
        x_range: x_min..x_max,
        y_range: y_min..y_max,
        series,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        markers,
        disc: None,
        cross: None,
    }
}

/// Dashed overlay for one acceleration envelope bound. A continuous bound
/// plots its own samples; a constant bound becomes a horizontal segment
/// from t=0 to the run's last timestamped record.
fn accel_bound_series(
    bound: &AccelBound,
    records: &[LogRecord],
    color: RGBColor,
) -> Option<PlotSeries> {
    let data = match bound {
        AccelBound::Continuous(pairs) => pairs.clone(),
        AccelBound::Constant(value) => {
            let t_end = records.iter().rev().find_map(|r| r.time)?;
            vec![(0.0, *value), (t_end, *value)]
        }
        AccelBound::Absent => return None,
    };
    if data.is_empty() {
        return None;
    }
    Some(PlotSeries {
        data,
        label: String::new(),
        color,
        stroke_width: LINE_WIDTH_PLOT,
        dashed: true,
    })
}

/// Silhouette of the target body on the side view, drawn when the comment
/// metadata carries `body.position` and `body.radius`.
fn body_disc(metadata: &RunMetadata) -> Option<PanelDisc> {
    let position = metadata.vector("body.position")?;
    let radius = metadata.float("body.radius")?;
    Some(PanelDisc {
        center: (position.x, position.y),
        radius,
        color: COLOR_BODY_DISC,
    })
}

/// Landing-target cross on the side view, taken from the `rf` metadata
/// vector.
fn target_cross(metadata: &RunMetadata) -> Option<PanelCross> {
    let target = metadata.vector("rf")?;
    Some(PanelCross {
        center: (target.x, target.y),
        color: COLOR_TARGET_CROSS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::log_data::FieldValue;

    fn record(time: Option<f64>, fields: &[(&str, f64)]) -> LogRecord {
        let mut record = LogRecord::default();
        if let Some(t) = time {
            record.set_field("time", FieldValue::Num(t));
        }
        for (name, value) in fields {
            record.set_field(name, FieldValue::Num(*value));
        }
        record
    }

    #[test]
    fn test_mark_record_picks_first_at_or_after() {
        let records = vec![
            record(Some(0.0), &[]),
            record(Some(10.0), &[]),
            record(Some(20.0), &[]),
        ];
        let found = mark_record(&records, 9.0).unwrap();
        assert_eq!(found.time, Some(10.0));
    }

    #[test]
    fn test_mark_record_past_the_end_is_none() {
        // No record reaches 103, so nothing is marked even though the
        // last record is nearby.
        let records = vec![record(Some(0.0), &[]), record(Some(100.0), &[])];
        assert!(mark_record(&records, 103.0).is_none());
    }

    #[test]
    fn test_mark_record_respects_the_window() {
        let records = vec![record(Some(0.0), &[]), record(Some(10.0), &[])];
        // The first record at or after 4 sits at 10, outside the window.
        assert!(mark_record(&records, 4.0).is_none());
        // 6 rounds forward to the record at 10, inside the window.
        assert!(mark_record(&records, 6.0).is_some());
        assert!(mark_record(&[], 1.0).is_none());
    }

    #[test]
    fn test_series_points_skips_incomplete_rows() {
        let records = vec![
            record(Some(0.0), &[("velocity", 5.0)]),
            record(Some(1.0), &[]),
            record(None, &[("velocity", 7.0)]),
            record(Some(2.0), &[("velocity", 6.0)]),
        ];
        let points = series_points(&records, "time", "velocity");
        assert_eq!(points, vec![(0.0, 5.0), (2.0, 6.0)]);
    }

    #[test]
    fn test_constant_bound_spans_from_zero_to_last_time() {
        let records = vec![record(Some(5.0), &[]), record(Some(42.0), &[])];
        let series = accel_bound_series(&AccelBound::Constant(30.0), &records, run_color(0)).unwrap();
        assert!(series.dashed);
        assert_eq!(series.data, vec![(0.0, 30.0), (42.0, 30.0)]);
    }

    #[test]
    fn test_absent_bound_has_no_overlay() {
        let records = vec![record(Some(5.0), &[])];
        assert!(accel_bound_series(&AccelBound::Absent, &records, run_color(0)).is_none());
        // A constant bound with no timestamped record has no span either.
        let no_time = vec![record(None, &[])];
        assert!(accel_bound_series(&AccelBound::Constant(1.0), &no_time, run_color(0)).is_none());
    }

    #[test]
    fn test_continuous_bound_keeps_its_own_samples() {
        let pairs = vec![(0.0, 28.0), (3.0, 29.5)];
        let series =
            accel_bound_series(&AccelBound::Continuous(pairs.clone()), &[], run_color(1)).unwrap();
        assert_eq!(series.data, pairs);
    }

    #[test]
    fn test_run_colors_cycle() {
        assert_eq!(run_color(0), run_color(COLOR_RUN_CYCLE.len()));
        assert_ne!(run_color(0), run_color(1));
    }

    #[test]
    fn test_body_disc_needs_both_keys() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("body.position=[0,-600000,0]");
        assert!(body_disc(&metadata).is_none());
        metadata.absorb_comment("body.radius=600000");
        let disc = body_disc(&metadata).unwrap();
        assert_eq!(disc.center, (0.0, -600000.0));
        assert_eq!(disc.radius, 600000.0);
    }

    #[test]
    fn test_target_cross_follows_rf_metadata() {
        let mut metadata = RunMetadata::new();
        assert!(target_cross(&metadata).is_none());
        metadata.absorb_comment("rf=[2760,5,2320,120]");
        let cross = target_cross(&metadata).unwrap();
        assert_eq!(cross.center, (2760.0, 5.0));
        // An unparseable descriptor drops the decoration.
        metadata.absorb_comment("rf=somewhere");
        assert!(target_cross(&metadata).is_none());
    }
}

// src/plot_functions/plot_overview.rs
