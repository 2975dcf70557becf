// src/data_input/run_metadata.rs

use std::collections::HashMap;

use crate::data_input::log_data::LogRecord;

/// Metadata keys whose values accumulate as ordered lists instead of
/// overwriting. Everything else is last-write-wins.
pub const REPEATABLE_KEYS: [&str; 1] = ["target"];

/// Key/value pairs collected from `#` comment lines.
///
/// One accumulator is threaded through every file of an invocation: scalar
/// keys overwrite in read order, so a key repeated in a later file wins,
/// while repeatable keys append in read order across all files.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetadata {
    scalars: HashMap<String, String>,
    sequences: HashMap<String, Vec<String>>,
    repeatable: Vec<String>,
}

impl Default for RunMetadata {
    fn default() -> Self {
        RunMetadata::new()
    }
}

impl RunMetadata {
    pub fn new() -> Self {
        RunMetadata::with_repeatable_keys(&REPEATABLE_KEYS)
    }

    /// Builds an accumulator with a custom repeatable-key set.
    pub fn with_repeatable_keys(keys: &[&str]) -> Self {
        RunMetadata {
            scalars: HashMap::new(),
            sequences: HashMap::new(),
            repeatable: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Absorbs the remainder of one comment line, marker already stripped.
    ///
    /// The remainder splits on single spaces; every token containing `=`
    /// contributes one key/value pair, split at the first `=`. Tokens
    /// without `=` are ignored, so free-text comments are harmless.
    pub fn absorb_comment(&mut self, rest: &str) {
        for token in rest.split(' ') {
            if let Some((key, value)) = token.split_once('=') {
                if self.repeatable.iter().any(|k| k == key) {
                    self.sequences
                        .entry(key.to_string())
                        .or_default()
                        .push(value.to_string());
                } else {
                    self.scalars.insert(key.to_string(), value.to_string());
                }
            }
        }
    }

    /// Latest raw value seen for a scalar key.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.scalars.get(key).map(String::as_str)
    }

    /// Every value seen for a repeatable key, in read order.
    pub fn sequence(&self, key: &str) -> &[String] {
        self.sequences.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Scalar value reinterpreted as a float, `None` when absent or
    /// unparseable.
    pub fn float(&self, key: &str) -> Option<f64> {
        self.scalar(key).and_then(|v| v.parse::<f64>().ok())
    }

    /// Scalar value reinterpreted as a bracketed vector descriptor.
    pub fn vector(&self, key: &str) -> Option<Vector3Time> {
        self.scalar(key).and_then(Vector3Time::parse)
    }
}

/// A bracketed vector descriptor from the comment metadata: `[x,y,z]`, with
/// an optional trailing time component as `[x,y,z,t]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3Time {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: Option<f64>,
}

impl Vector3Time {
    /// Parses a descriptor; `None` for anything that is not a bracketed
    /// three- or four-component number list.
    pub fn parse(text: &str) -> Option<Vector3Time> {
        let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let mut components = [0.0f64; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.trim().parse::<f64>().ok()?;
        }
        let t = match parts.get(3) {
            Some(part) => Some(part.trim().parse::<f64>().ok()?),
            None => None,
        };
        Some(Vector3Time {
            x: components[0],
            y: components[1],
            z: components[2],
            t,
        })
    }
}

/// How an acceleration envelope bound (`amin`/`amax`) is known for one file.
///
/// Resolved once per file, right after its rows are parsed, against the
/// accumulator state as of that file. A header column wins over a comment
/// scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum AccelBound {
    /// The file logs the bound per sample; (time, value) pairs in record
    /// order, rows lacking either component skipped.
    Continuous(Vec<(f64, f64)>),
    /// A single scalar from the comment metadata.
    Constant(f64),
    Absent,
}

impl AccelBound {
    pub fn resolve(
        key: &str,
        header: &[String],
        records: &[LogRecord],
        metadata: &RunMetadata,
    ) -> AccelBound {
        if header.iter().any(|h| h.as_str() == key) {
            let series: Vec<(f64, f64)> = records
                .iter()
                .filter_map(|r| Some((r.time?, r.field(key)?)))
                .collect();
            return AccelBound::Continuous(series);
        }
        match metadata.float(key) {
            Some(value) => AccelBound::Constant(value),
            None => AccelBound::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::log_data::FieldValue;

    #[test]
    fn test_comment_line_with_scalars_and_repeated_key() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("amin=1.5 amax=3.0 target=A target=B");
        assert_eq!(metadata.scalar("amin"), Some("1.5"));
        assert_eq!(metadata.scalar("amax"), Some("3.0"));
        assert_eq!(metadata.sequence("target"), ["A", "B"]);
    }

    #[test]
    fn test_scalar_keys_are_last_write_wins_across_lines() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("throttle=0.4");
        metadata.absorb_comment("throttle=0.9");
        assert_eq!(metadata.scalar("throttle"), Some("0.9"));
    }

    #[test]
    fn test_repeatable_key_accumulates_across_lines() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("target=[10,0,0]");
        metadata.absorb_comment("note=burn target=[20,0,0,45]");
        assert_eq!(metadata.sequence("target"), ["[10,0,0]", "[20,0,0,45]"]);
        assert_eq!(metadata.scalar("note"), Some("burn"));
    }

    #[test]
    fn test_tokens_without_equals_are_ignored() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("free text then amax=30");
        assert_eq!(metadata.scalar("amax"), Some("30"));
        assert_eq!(metadata.scalar("free"), None);
    }

    #[test]
    fn test_value_split_happens_at_first_equals() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("expr=a=b");
        assert_eq!(metadata.scalar("expr"), Some("a=b"));
    }

    #[test]
    fn test_float_accessor() {
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("amax=29.4 phase=Descent");
        assert_eq!(metadata.float("amax"), Some(29.4));
        assert_eq!(metadata.float("phase"), None);
        assert_eq!(metadata.float("missing"), None);
    }

    #[test]
    fn test_vector3time_parses_three_and_four_components() {
        let v = Vector3Time::parse("[1.5,-2,30]").unwrap();
        assert_eq!((v.x, v.y, v.z, v.t), (1.5, -2.0, 30.0, None));

        let v = Vector3Time::parse("[0, 600000, 0, 45.5]").unwrap();
        assert_eq!((v.x, v.y, v.z, v.t), (0.0, 600000.0, 0.0, Some(45.5)));
    }

    #[test]
    fn test_vector3time_rejects_malformed_descriptors() {
        assert_eq!(Vector3Time::parse("1,2,3"), None);
        assert_eq!(Vector3Time::parse("[1,2]"), None);
        assert_eq!(Vector3Time::parse("[1,2,3,4,5]"), None);
        assert_eq!(Vector3Time::parse("[a,b,c]"), None);
        assert_eq!(Vector3Time::parse(""), None);
    }

    fn record_with(time: f64, key: &str, value: f64) -> LogRecord {
        let mut record = LogRecord::default();
        record.set_field("time", FieldValue::Num(time));
        record.set_field(key, FieldValue::Num(value));
        record
    }

    #[test]
    fn test_accel_bound_prefers_header_column() {
        let header: Vec<String> = ["time", "amax"].iter().map(|s| s.to_string()).collect();
        let records = vec![record_with(0.0, "amax", 30.0), record_with(1.0, "amax", 28.5)];
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("amax=99");

        let bound = AccelBound::resolve("amax", &header, &records, &metadata);
        assert_eq!(
            bound,
            AccelBound::Continuous(vec![(0.0, 30.0), (1.0, 28.5)])
        );
    }

    #[test]
    fn test_accel_bound_falls_back_to_comment_scalar() {
        let header: Vec<String> = ["time", "x"].iter().map(|s| s.to_string()).collect();
        let mut metadata = RunMetadata::new();
        metadata.absorb_comment("amin=2.0");

        let bound = AccelBound::resolve("amin", &header, &[], &metadata);
        assert_eq!(bound, AccelBound::Constant(2.0));
    }

    #[test]
    fn test_accel_bound_absent_without_column_or_scalar() {
        let header: Vec<String> = ["time"].iter().map(|s| s.to_string()).collect();
        let metadata = RunMetadata::new();
        assert_eq!(
            AccelBound::resolve("amin", &header, &[], &metadata),
            AccelBound::Absent
        );
    }

    #[test]
    fn test_continuous_bound_skips_rows_missing_either_component() {
        let header: Vec<String> = ["time", "amax"].iter().map(|s| s.to_string()).collect();
        let mut records = vec![record_with(0.0, "amax", 30.0)];
        let mut no_time = LogRecord::default();
        no_time.set_field("amax", FieldValue::Num(29.0));
        records.push(no_time);
        let mut no_value = LogRecord::default();
        no_value.set_field("time", FieldValue::Num(2.0));
        records.push(no_value);

        let metadata = RunMetadata::new();
        let bound = AccelBound::resolve("amax", &header, &records, &metadata);
        assert_eq!(bound, AccelBound::Continuous(vec![(0.0, 30.0)]));
    }
}

// src/data_input/run_metadata.rs
