use clap::Parser;
use sweepbench_sim::BenchError;
use tracing_subscriber::EnvFilter;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;

fn main() {
    // stdout carries the per-size progress lines; diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            e.chain()
                .find_map(|cause| cause.downcast_ref::<BenchError>())
                .map_or(exit_codes::EXIT_CONFIG_ERROR, exit_codes::for_error)
        }
    };
    std::process::exit(code);
}
