use crate::cli::args::PlotArgs;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use sweepbench_sim::{load_series, render, BenchConfig};

pub fn run(args: PlotArgs) -> Result<i32> {
    let mut cfg = BenchConfig::resolve(args.config.as_deref())?;
    if let Some(metrics) = args.metrics {
        cfg.metrics = metrics;
    }
    if let Some(output) = args.output {
        cfg.chart = output;
    }
    if let Some(title) = args.title {
        cfg.plot.title = title;
    }

    // Parse everything before touching the output so a bad line leaves no chart behind.
    let series = load_series(&cfg.metrics)?;
    render(&series, &cfg.plot, &cfg.chart)?;

    println!("Saved as '{}'.", cfg.chart.display());
    Ok(EXIT_SUCCESS)
}
