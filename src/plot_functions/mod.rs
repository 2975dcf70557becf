// src/plot_functions/mod.rs

pub mod plot_overview;

// src/plot_functions/mod.rs
