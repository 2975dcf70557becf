// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data_input::log_data::{FieldValue, LogRecord};
use crate::data_input::run_metadata::{AccelBound, RunMetadata};
use crate::types::TrajError;

/// Why a candidate data row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RowDiscard {
    /// Token count differs from the header's column count.
    FieldCountMismatch { expected: usize, found: usize },
    /// The row could not be tokenized at all.
    Unreadable,
}

/// Outcome of tokenizing one candidate data row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(LogRecord),
    Discarded(RowDiscard),
}

/// Everything read from one log file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    /// Header-declared column names, in column order.
    pub header: Vec<String>,
    /// Accepted data rows, in file order.
    pub records: Vec<LogRecord>,
    /// One entry per dropped row, kept for inspection. Nothing in the
    /// pipeline prints or reports these.
    pub discards: Vec<RowDiscard>,
    /// Acceleration bounds resolved against this file's header and the
    /// accumulator state as of this file.
    pub amin: AccelBound,
    pub amax: AccelBound,
}

/// Reads one trajectory log: `#` lines feed the metadata accumulator, the
/// first non-comment line is the column header, every later line is a
/// candidate data row.
///
/// A malformed row never aborts the read; it becomes a `RowDiscard` and the
/// scan continues. IO failures on open or read do abort.
pub fn parse_log_file(
    input_file_path: &Path,
    metadata: &mut RunMetadata,
) -> Result<ParsedLog, TrajError> {
    let file = File::open(input_file_path).map_err(|e| TrajError::Io {
        path: input_file_path.to_path_buf(),
        source: e,
    })?;

    // First pass: route each line to the metadata accumulator, the header
    // slot or the data-row section.
    let mut header: Option<Vec<String>> = None;
    let mut data_lines: Vec<String> = Vec::new();
    let reader = BufReader::new(file);
    for line_result in reader.lines() {
        let raw = line_result.map_err(|e| TrajError::Io {
            path: input_file_path.to_path_buf(),
            source: e,
        })?;
        let line = raw.trim_end_matches('\r');

        if let Some(rest) = line.strip_prefix('#') {
            metadata.absorb_comment(rest);
            continue;
        }
        match header {
            // The header splits on whitespace runs, unlike data rows.
            None => header = Some(line.split_whitespace().map(str::to_string).collect()),
            Some(_) => data_lines.push(line.to_string()),
        }
    }
    let header = header.unwrap_or_default();

    // Second pass: tokenize the data rows. Single-space delimiter, no
    // quoting, flexible record lengths; the count check in `parse_data_row`
    // does the real filtering.
    let mut records: Vec<LogRecord> = Vec::new();
    let mut discards: Vec<RowDiscard> = Vec::new();
    let csv_content = data_lines.join("\n");
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .quoting(false)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    for result in csv_reader.records() {
        match parse_data_row(result, &header) {
            RowOutcome::Record(record) => records.push(record),
            RowOutcome::Discarded(reason) => discards.push(reason),
        }
    }

    let amin = AccelBound::resolve("amin", &header, &records, metadata);
    let amax = AccelBound::resolve("amax", &header, &records, metadata);

    Ok(ParsedLog {
        header,
        records,
        discards,
        amin,
        amax,
    })
}

/// Tokenizes one candidate row against the header. Rows whose token count
/// does not match the header are discarded, never zero-filled.
fn parse_data_row(
    result: Result<csv::StringRecord, csv::Error>,
    header: &[String],
) -> RowOutcome {
    let tokens = match result {
        Ok(tokens) => tokens,
        Err(_) => return RowOutcome::Discarded(RowDiscard::Unreadable),
    };
    if tokens.len() != header.len() {
        return RowOutcome::Discarded(RowDiscard::FieldCountMismatch {
            expected: header.len(),
            found: tokens.len(),
        });
    }
    let mut record = LogRecord::default();
    for (name, token) in header.iter().zip(tokens.iter()) {
        record.set_field(name, FieldValue::from_token(token));
    }
    RowOutcome::Record(record)
}


// src/data_input/log_parser.rs
