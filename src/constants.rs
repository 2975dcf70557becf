// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLACK, BLUE, BROWN, GREEN, GREY, PINK, PURPLE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1500;
pub const PLOT_HEIGHT: u32 = 1000;

// Font sizes across the overview figure.
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_LEGEND: i32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// CSS salmon; the material palette has no direct equivalent.
pub const SALMON: RGBColor = RGBColor(250, 128, 114);

// --- Plot Color Assignments ---
// One line color per run, cycled when more runs are given than colors.
pub const COLOR_RUN_CYCLE: [RGBColor; 8] = [RED, BLUE, GREEN, BLACK, PINK, GREY, PURPLE, SALMON];
pub const COLOR_BODY_DISC: RGBColor = BROWN;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Dash geometry for acceleration-bound overlays.
pub const BOUND_DASH_SIZE: u32 = 8;
pub const BOUND_DASH_SPACING: u32 = 6;

// The acceleration panel keeps headroom above the largest value.
pub const ACCEL_AXIS_HEADROOM: f64 = 1.1;

// Mark-time decorations: dot radius in pixels, dot opacity, and the widest
// time gap that still counts as a match.
pub const MARK_POINT_RADIUS: i32 = 5;
pub const MARK_POINT_OPACITY: f64 = 0.5;
pub const MARK_TIME_WINDOW_S: f64 = 5.0;

// Segment count approximating the body-disc outline on the side view.
pub const BODY_DISC_SEGMENTS: usize = 90;

// Landing-target cross on the side view.
pub const COLOR_TARGET_CROSS: RGBColor = BLACK;
pub const TARGET_CROSS_SIZE: i32 = 6;

// src/constants.rs
