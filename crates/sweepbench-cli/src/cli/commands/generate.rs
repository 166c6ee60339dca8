use crate::cli::args::GenerateArgs;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sweepbench_sim::{BenchConfig, SizeRange, Subject, Sweep, SweepEvent};

/// Merge precedence: built-in defaults → config file → flags.
fn resolve_config(args: &GenerateArgs) -> Result<BenchConfig> {
    let mut cfg = BenchConfig::resolve(args.config.as_deref())?;
    if let Some(start) = args.start {
        cfg.sizes.start = start;
    }
    if let Some(end) = args.end {
        cfg.sizes.end = end;
    }
    if let Some(program) = &args.program {
        cfg.program = program.clone();
    }
    if let Some(dir) = &args.working_dir {
        cfg.working_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.input_dir {
        cfg.inputs.dir = dir.clone();
    }
    if let Some(prefix) = &args.prefix {
        cfg.inputs.prefix = prefix.clone();
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

pub fn run(args: GenerateArgs) -> Result<i32> {
    let cfg = resolve_config(&args)?;
    let range = SizeRange::new(cfg.sizes.start, cfg.sizes.end)?;
    let subject = cfg.subject();
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sweep = Sweep::new(range, cfg.input_layout());
    let mut report = sweep.run_with(&mut rng, &subject, |event| match event {
        SweepEvent::InputWritten { n, path } => {
            println!("Created '{}' with {} points.", path.display(), n);
        }
        SweepEvent::Finished(res) => {
            let cmd = subject.describe(&res.input);
            match &res.message {
                None => println!("Executed '{cmd}' successfully."),
                Some(cause) => println!("Error executing '{cmd}': {cause}"),
            }
        }
    })?;
    report.program = Some(cfg.program.display().to_string());
    report.seed = cfg.seed;

    println!();
    println!(
        "SUMMARY: total={} succeeded={} failed={}",
        report.summary.total, report.summary.succeeded, report.summary.failed
    );
    if report.summary.failed > 0 {
        let sizes: Vec<String> = report.failures().map(|r| r.n.to_string()).collect();
        println!("Failed sizes: {}", sizes.join(", "));
    }

    if let Some(path) = &args.report {
        report
            .write_json(path)
            .context("failed to write report")?;
        println!("Report saved to {}", path.display());
    }

    Ok(EXIT_SUCCESS)
}
