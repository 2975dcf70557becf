// src/main.rs

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use traj_log_render::data_analysis::bounds::{reference_direction, BoundOverrides, PlotBounds};
use traj_log_render::data_analysis::derived_fields::add_derived_fields;
use traj_log_render::data_input::log_data::RunDataset;
use traj_log_render::data_input::log_parser::parse_log_file;
use traj_log_render::data_input::run_metadata::RunMetadata;
use traj_log_render::plot_functions::plot_overview::plot_overview;

/// Render a six-pane comparison figure from vessel trajectory logs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Trajectory log files; the first file fixes the downrange direction
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Time axis minimum (s); every bound is inferred from the data when omitted
    #[arg(long)]
    tmin: Option<f64>,
    /// Time axis maximum (s)
    #[arg(long)]
    tmax: Option<f64>,
    /// Downrange axis minimum (m)
    #[arg(long)]
    dmin: Option<f64>,
    /// Downrange axis maximum (m)
    #[arg(long)]
    dmax: Option<f64>,
    /// Velocity axis maximum (m/s)
    #[arg(long)]
    vmax: Option<f64>,
    /// Altitude axis maximum (m)
    #[arg(long)]
    ymax: Option<f64>,
    /// Acceleration axis maximum (m/s^2)
    #[arg(long)]
    accelmax: Option<f64>,
    /// Target error axis maximum (m)
    #[arg(long)]
    emax: Option<f64>,
    /// Highlight the record nearest this time (s) with a dot on every pane
    #[arg(long)]
    marktime: Option<f64>,
    /// Output PNG path; defaults to '<first input stem>_overview.png'
    #[arg(long)]
    savepng: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // One metadata accumulator across all files: scalars last-write-wins,
    // repeatable keys append in read order.
    let mut metadata = RunMetadata::new();
    let mut runs: Vec<RunDataset> = Vec::new();

    for path in &cli.files {
        let label = path.display().to_string();
        println!("Reading '{label}'...");
        let parsed = parse_log_file(path, &mut metadata)
            .with_context(|| format!("failed to read '{label}'"))?;
        println!("  Finished reading {} data rows.", parsed.records.len());
        runs.push(RunDataset {
            label,
            records: parsed.records,
            amin: parsed.amin,
            amax: parsed.amax,
        });
    }

    let vd = reference_direction(&runs)
        .context("could not establish the downrange reference direction")?;
    println!("Downrange direction: [{:.3}, 0.000, {:.3}]", vd.x, vd.z);

    for run in &mut runs {
        add_derived_fields(&mut run.records, &vd)
            .with_context(|| format!("incomplete record in '{}'", run.label))?;
    }

    let overrides = BoundOverrides {
        tmin: cli.tmin,
        tmax: cli.tmax,
        dmin: cli.dmin,
        dmax: cli.dmax,
        vmax: cli.vmax,
        ymax: cli.ymax,
        accelmax: cli.accelmax,
        emax: cli.emax,
    };
    let bounds = PlotBounds::resolve(&overrides, &runs).context("could not resolve axis bounds")?;

    let root_name = cli.files[0]
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let save_png = cli.savepng.as_ref().map(|p| p.display().to_string());

    println!("\n--- Generating Trajectory Overview ---");
    plot_overview(
        &runs,
        &metadata,
        &bounds,
        cli.marktime,
        &root_name,
        save_png.as_deref(),
    )
    .map_err(|e| anyhow!("{e}"))
    .context("failed to render the overview figure")?;

    Ok(())
}
