// src/data_input/mod.rs

pub mod log_data;
pub mod log_parser;
pub mod run_metadata;

// src/data_input/mod.rs
