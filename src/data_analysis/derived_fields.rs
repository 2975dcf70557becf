// src/data_analysis/derived_fields.rs

use nalgebra::Vector3;

use crate::data_input::log_data::LogRecord;
use crate::types::TrajError;

/// Attaches `downrange`, `velocity` and `mag_accel` to one record.
///
/// `vd` is the shared unit downrange direction. The projection uses only
/// the horizontal components of position, so `y` plays no part. Fails when
/// any of x/z/vx/vy/vz/ax/ay/az is absent or non-numeric; a missing
/// component is never substituted with zero.
pub fn derive_record(record: &mut LogRecord, vd: &Vector3<f64>) -> Result<(), TrajError> {
    let require =
        |name: &str, value: Option<f64>| value.ok_or_else(|| TrajError::MissingField(name.to_string()));

    let x = require("x", record.x)?;
    let z = require("z", record.z)?;
    let vx = require("vx", record.vx)?;
    let vy = require("vy", record.vy)?;
    let vz = require("vz", record.vz)?;
    let ax = require("ax", record.ax)?;
    let ay = require("ay", record.ay)?;
    let az = require("az", record.az)?;

    record.downrange = Some(Vector3::new(x, 0.0, z).dot(vd));
    record.velocity = Some(Vector3::new(vx, vy, vz).norm());
    record.mag_accel = Some(Vector3::new(ax, ay, az).norm());
    Ok(())
}

/// Runs [`derive_record`] over a whole parsed run, in place.
pub fn add_derived_fields(records: &mut [LogRecord], vd: &Vector3<f64>) -> Result<(), TrajError> {
    for record in records.iter_mut() {
        derive_record(record, vd)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::data_input::log_data::FieldValue;

    fn full_record() -> LogRecord {
        let mut record = LogRecord::default();
        for (name, value) in [
            ("time", 1.0),
            ("x", 3.0),
            ("y", 500.0),
            ("z", 4.0),
            ("vx", 3.0),
            ("vy", 4.0),
            ("vz", 0.0),
            ("ax", -1.0),
            ("ay", -2.0),
            ("az", 2.0),
        ] {
            record.set_field(name, FieldValue::Num(value));
        }
        record
    }

    #[test]
    fn test_velocity_is_euclidean_speed() {
        let mut record = full_record();
        derive_record(&mut record, &Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(record.velocity.unwrap(), 5.0);
    }

    #[test]
    fn test_mag_accel_is_nonnegative_norm() {
        let mut record = full_record();
        derive_record(&mut record, &Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(record.mag_accel.unwrap(), 3.0);
    }

    #[test]
    fn test_downrange_projects_horizontal_position() {
        let mut record = full_record();
        let vd = Vector3::new(0.6, 0.0, 0.8);
        derive_record(&mut record, &vd).unwrap();
        // (3, 0, 4) . (0.6, 0, 0.8)
        assert_relative_eq!(record.downrange.unwrap(), 5.0);
    }

    #[test]
    fn test_altitude_does_not_enter_the_projection() {
        let mut low = full_record();
        let mut high = full_record();
        high.y = Some(999999.0);
        let vd = Vector3::new(1.0, 0.0, 0.0);
        derive_record(&mut low, &vd).unwrap();
        derive_record(&mut high, &vd).unwrap();
        assert_relative_eq!(low.downrange.unwrap(), high.downrange.unwrap());
    }

    #[test]
    fn test_missing_velocity_component_is_an_error() {
        let mut record = full_record();
        record.vx = None;
        let err = derive_record(&mut record, &Vector3::new(1.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, TrajError::MissingField(name) if name == "vx"));
    }

    #[test]
    fn test_whole_run_fails_on_first_incomplete_record() {
        let mut records = vec![full_record(), LogRecord::default()];
        let err = add_derived_fields(&mut records, &Vector3::new(1.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, TrajError::MissingField(_)));
        // The first record was already derived before the failure.
        assert!(records[0].downrange.is_some());
    }
}

// src/data_analysis/derived_fields.rs
