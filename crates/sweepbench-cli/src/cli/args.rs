use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sweepbench",
    version,
    about = "Generate random point-set inputs across a size sweep, run a program on each, and plot n vs. T"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write an input file for every size in range and run the program on each
    Generate(GenerateArgs),
    /// Plot the program's n,T records as a line chart
    Plot(PlotArgs),
    Version,
}

// Unset flags fall back to the config file, then to built-in defaults.

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// First input size [default: 10]
    #[arg(long, short)]
    pub start: Option<usize>,

    /// Last input size, inclusive [default: 1000]
    #[arg(long, short)]
    pub end: Option<usize>,

    /// Program under test, run as `<program> <input-file>` [default: ./main]
    #[arg(long, short, env = "SWEEPBENCH_PROGRAM")]
    pub program: Option<PathBuf>,

    /// Working directory for the program
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// Directory for generated input files [default: .]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Input filename prefix; the size is appended [default: input]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Seed for reproducible inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to write machine-readable JSON report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Config file [default: sweepbench.yaml, if present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PlotArgs {
    /// n,T records to plot [default: nT_data]
    #[arg(long, short)]
    pub metrics: Option<PathBuf>,

    /// Chart output path (SVG) [default: nT_plot.svg]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Config file [default: sweepbench.yaml, if present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}
