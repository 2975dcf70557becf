// src/data_input/log_data.rs

use std::collections::HashMap;

use crate::data_input::run_metadata::AccelBound;

/// One value from a data row: numeric when the token parses as `f64`,
/// otherwise the raw text. Mixed rows are legal.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Num(f64),
    Text(String),
}

impl FieldValue {
    /// Float-parses a raw token, falling back to text.
    pub fn from_token(token: &str) -> FieldValue {
        match token.parse::<f64>() {
            Ok(v) => FieldValue::Num(v),
            Err(_) => FieldValue::Text(token.to_string()),
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            FieldValue::Num(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

/// One observed instant of a trajectory log.
///
/// The fields every computation depends on live in fixed slots, `None` when
/// the column is missing or its token did not parse as a number. Columns
/// outside the fixed set land in `extra` under their header name, as do the
/// raw text values of fixed-slot columns that failed the float parse, so an
/// accepted row loses nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogRecord {
    pub time: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub vz: Option<f64>,
    pub ax: Option<f64>,
    pub ay: Option<f64>,
    pub az: Option<f64>,
    /// Derived after parsing; never present in the raw file.
    pub downrange: Option<f64>,
    pub velocity: Option<f64>,
    pub mag_accel: Option<f64>,
    pub extra: HashMap<String, FieldValue>,
}

impl LogRecord {
    /// Stores one header-named value on the record.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        if let FieldValue::Num(v) = &value {
            if let Some(slot) = self.slot_mut(name) {
                *slot = Some(*v);
                return;
            }
        }
        self.extra.insert(name.to_string(), value);
    }

    /// Numeric value of a field by name: fixed slots first, then `extra`.
    /// Text values and absent columns both read as `None`.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "time" => self.time,
            "x" => self.x,
            "y" => self.y,
            "z" => self.z,
            "vx" => self.vx,
            "vy" => self.vy,
            "vz" => self.vz,
            "ax" => self.ax,
            "ay" => self.ay,
            "az" => self.az,
            "downrange" => self.downrange,
            "velocity" => self.velocity,
            "mag_accel" => self.mag_accel,
            _ => self.extra.get(name).and_then(FieldValue::as_num),
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<f64>> {
        match name {
            "time" => Some(&mut self.time),
            "x" => Some(&mut self.x),
            "y" => Some(&mut self.y),
            "z" => Some(&mut self.z),
            "vx" => Some(&mut self.vx),
            "vy" => Some(&mut self.vy),
            "vz" => Some(&mut self.vz),
            "ax" => Some(&mut self.ax),
            "ay" => Some(&mut self.ay),
            "az" => Some(&mut self.az),
            "downrange" => Some(&mut self.downrange),
            "velocity" => Some(&mut self.velocity),
            "mag_accel" => Some(&mut self.mag_accel),
            _ => None,
        }
    }
}

/// One input file's worth of data, as handed to aggregation and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDataset {
    /// File path as given on the command line; doubles as the legend label.
    pub label: String,
    pub records: Vec<LogRecord>,
    /// Acceleration bounds resolved while this file was read.
    pub amin: AccelBound,
    pub amax: AccelBound,
}


// src/data_input/log_data.rs
