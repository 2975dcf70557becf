// src/types.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the parse → derive → aggregate pipeline.
///
/// Malformed data rows are not represented here: the parser skips them
/// locally (`RowOutcome::Discarded`) and a single bad line never aborts a
/// read.
#[derive(Debug, Error)]
pub enum TrajError {
    /// A record lacks a field required for derived-field computation or for
    /// inferring an axis bound.
    #[error("record is missing required field '{0}'")]
    MissingField(String),

    /// The first input file produced no records, so no downrange reference
    /// direction can be established.
    #[error("no data rows parsed from '{0}'; cannot establish a reference direction")]
    EmptyDataset(String),

    /// The reference-direction vector has zero (or non-finite) norm.
    #[error("degenerate reference direction: first record's horizontal position does not normalize")]
    DegenerateVector,

    /// A pooled min/max had no defined ordering, e.g. NaN in the values.
    #[error("cannot infer a bound for field '{0}': pooled values have no ordered min/max")]
    UndefinedRange(String),

    /// An input file could not be opened or read.
    #[error("failed to read log file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Plot data types
pub type SeriesPoints = Vec<(f64, f64)>;

// src/types.rs
