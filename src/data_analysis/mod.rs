// src/data_analysis/mod.rs

pub mod bounds;
pub mod derived_fields;

// src/data_analysis/mod.rs
