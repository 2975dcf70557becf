// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::Circle;
use plotters::element::Cross;
use plotters::element::PathElement;
use plotters::element::Polygon;
use plotters::element::Text;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    BODY_DISC_SEGMENTS, BOUND_DASH_SIZE, BOUND_DASH_SPACING, FONT_SIZE_AXIS_LABEL,
    FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE,
    LINE_WIDTH_LEGEND, MARK_POINT_OPACITY, MARK_POINT_RADIUS, PLOT_HEIGHT, PLOT_WIDTH,
    TARGET_CROSS_SIZE,
};
use crate::types::SeriesPoints;

/// Turn a resolved bound pair into something a chart axis accepts.
/// Inferred and overridden bounds pass through untouched; only a reversed
/// pair is swapped and a zero-width pair widened symmetrically.
pub fn drawable_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    if (max - min).abs() < 1e-9 {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// Draw a "Data Unavailable" message on a pane area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    pane_name: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4; // Additional spacing between lines

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{pane_name} Data Unavailable:\n{reason}");

    // Estimate text dimensions for better centering
    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    // Find the longest line to estimate width
    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: SeriesPoints,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    /// Dashed series are overlays (acceleration envelopes); they never get
    /// a legend entry.
    pub dashed: bool,
}

/// A highlighted sample, drawn as a translucent dot in the series color.
#[derive(Clone, Copy)]
pub struct MarkPoint {
    pub x: f64,
    pub y: f64,
    pub color: RGBColor,
}

/// A filled disc in data coordinates (the target body silhouette on the
/// side view).
#[derive(Clone, Copy)]
pub struct PanelDisc {
    pub center: (f64, f64),
    pub radius: f64,
    pub color: RGBColor,
}

/// A cross at a fixed data coordinate (the landing target on the side
/// view).
#[derive(Clone, Copy)]
pub struct PanelCross {
    pub center: (f64, f64),
    pub color: RGBColor,
}

#[derive(Clone)]
pub struct PanelConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub markers: Vec<MarkPoint>,
    pub disc: Option<PanelDisc>,
    pub cross: Option<PanelCross>,
}

/// The six overview panes, in layout order: the left column stacks the
/// three time/altitude charts, the right column holds the two envelope
/// charts above the large side view.
pub struct OverviewPanels {
    pub downrange: PanelConfig,
    pub velocity_time: PanelConfig,
    pub velocity_altitude: PanelConfig,
    pub acceleration: PanelConfig,
    pub target_error: PanelConfig,
    pub side_view: PanelConfig,
}

/// Draws a single pane chart from a PanelConfig struct.
fn draw_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    panel_config: &PanelConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(panel_config.x_range.clone(), panel_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&panel_config.x_label)
        .y_desc(&panel_config.y_label)
        .x_labels(10)
        .y_labels(10)
        .y_label_formatter(&|y| {
            // Format Y-axis labels with "k" and "M" notation for large values
            // (altitude and downrange reach hundreds of kilometers)
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1000.0 {
                format!("{:.0}k", y / 1000.0)
            } else if y.abs() < 10.0 && y.fract() != 0.0 {
                format!("{:.1}", y)
            } else {
                format!("{:.0}", y)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    // Draw the body disc BEFORE series (so trajectories appear on top)
    if let Some(disc) = &panel_config.disc {
        let outline: Vec<(f64, f64)> = (0..=BODY_DISC_SEGMENTS)
            .map(|i| {
                let angle = (i as f64 / BODY_DISC_SEGMENTS as f64) * std::f64::consts::TAU;
                (
                    disc.center.0 + disc.radius * angle.cos(),
                    disc.center.1 + disc.radius * angle.sin(),
                )
            })
            .collect();
        chart.draw_series(std::iter::once(Polygon::new(outline, disc.color.filled())))?;
    }

    let mut legend_series_count = 0;

    for s in &panel_config.series {
        if s.data.is_empty() {
            continue;
        }

        if s.dashed {
            chart.draw_series(DashedLineSeries::new(
                s.data.iter().cloned(),
                BOUND_DASH_SIZE,
                BOUND_DASH_SPACING,
                s.color.stroke_width(s.stroke_width),
            ))?;
            continue;
        }

        // Regular series - only add legend if label is not empty
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;

        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    // Mark dots go on top of the series they annotate
    for mark in &panel_config.markers {
        chart.draw_series(std::iter::once(Circle::new(
            (mark.x, mark.y),
            MARK_POINT_RADIUS,
            mark.color.mix(MARK_POINT_OPACITY).filled(),
        )))?;
    }

    if let Some(cross) = &panel_config.cross {
        chart.draw_series(std::iter::once(Cross::new(
            cross.center,
            TARGET_CROSS_SIZE,
            cross.color.stroke_width(LINE_WIDTH_LEGEND),
        )))?;
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

/// Creates the overview image: three stacked panes on the left half, two
/// quarter panes and the large side view on the right half.
pub fn draw_overview_figure<'a>(
    output_filename: &'a str,
    root_name: &str,
    panels: OverviewPanels,
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);

    let (left_area, right_area) = margined_root_area.split_horizontally((PLOT_WIDTH / 2) as i32);
    let left_panes = left_area.split_evenly((3, 1));
    let (right_top, side_view_pane) = right_area.split_vertically((PLOT_HEIGHT / 3) as i32);
    let right_top_panes = right_top.split_evenly((1, 2));

    let panes = [
        (&left_panes[0], panels.downrange, "Downrange"),
        (&left_panes[1], panels.velocity_time, "Velocity/Time"),
        (&left_panes[2], panels.velocity_altitude, "Velocity/Altitude"),
        (&right_top_panes[0], panels.acceleration, "Acceleration"),
        (&right_top_panes[1], panels.target_error, "Target Error"),
        (&side_view_pane, panels.side_view, "Side View"),
    ];
    let mut any_pane_drawn = false;

    for (area, panel_config, pane_name) in panes {
        let has_data = !panel_config.series.is_empty()
            && panel_config.series.iter().any(|s| !s.data.is_empty());
        let valid_ranges = panel_config.x_range.end > panel_config.x_range.start
            && panel_config.y_range.end > panel_config.y_range.start;

        if has_data && valid_ranges {
            draw_panel(area, &panel_config)?;
            any_pane_drawn = true;
        } else {
            let reason = if !has_data {
                "No data points"
            } else {
                "Invalid ranges"
            };
            draw_unavailable_message(area, pane_name, reason)?;
        }
    }

    if any_pane_drawn {
        root_area.present()?;
        println!("  Overview plot saved as '{output_filename}'.");
    } else {
        root_area.present()?;
        println!("  '{output_filename}' shows only placeholder messages: no data available for any pane.");
    }
    Ok(())
}


// src/plot_framework.rs
