//! Worker Scaling Plot - Main entry point
//!
//! Renders speedup, efficiency and total time against worker count as three
//! side-by-side panels and writes them to a PNG (18 × 5 in at 300 dpi by
//! default).
//!
//! Usage:
//! ```bash
//! worker_scaling_plot                       # built-in benchmark → analisis_workers.png
//! worker_scaling_plot -i runs.json --table  # derive metrics from raw timings
//! RUST_LOG=debug worker_scaling_plot --show
//! ```

use anyhow::Context;
use clap::Parser;
use worker_scaling_plot::cli::Cli;
use worker_scaling_plot::config::ChartConfig;
use worker_scaling_plot::pipeline;
use worker_scaling_plot::render::viewer;
use worker_scaling_plot::scaling::{report, ScalingDataset};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    log::info!("Worker Scaling Plot v{}", env!("CARGO_PKG_VERSION"));

    let props = cli.properties().context("Failed to load chart properties")?;
    let config = ChartConfig::from_properties(&props);

    let dataset = match &cli.input {
        Some(path) => ScalingDataset::from_file(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?,
        None => ScalingDataset::builtin(),
    };
    log::info!("Dataset: {} worker counts {:?}", dataset.len(), dataset.workers());

    if cli.table {
        print!("{}", report::format_table(&dataset));
        if let Some(best) = report::best_workers(&dataset) {
            println!("Best worker count (lowest total time): {}", best);
        }
        println!();
    }

    let result =
        pipeline::generate_figure(&dataset, &config).context("Failed to generate figure")?;
    let path = pipeline::save_figure(&result, &config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    println!(
        "✓ Saved {} ({} bytes, {}×{} px at {} dpi)",
        path.display(),
        result.png_buffer.len(),
        result.width,
        result.height,
        result.dpi
    );

    if cli.show {
        if let Err(e) = viewer::open_in_viewer(&path) {
            log::warn!("Could not display figure: {}", e);
        }
    }

    Ok(())
}
