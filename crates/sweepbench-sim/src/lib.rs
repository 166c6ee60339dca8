//! Input-size sweeps for benchmarking a program, and the n-vs-T chart of its timings.

pub mod config;
pub mod error;
pub mod metrics;
pub mod plot;
pub mod points;
pub mod report;
pub mod subject;
pub mod sweep;

pub use config::BenchConfig;
pub use error::BenchError;
pub use metrics::{load_series, parse_series, MetricSample, MetricSeries};
pub use plot::{render, render_document, PlotStyle};
pub use points::{generate, Point, PointSet, COORD_MAX};
pub use report::{RunResult, RunStatus, SweepReport, SweepSummary};
pub use subject::{Subject, SubjectFailure, SubjectRunner};
pub use sweep::{run_sweep, InputLayout, SizeRange, Sweep, SweepEvent};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sweep_then_plot_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let layout = InputLayout {
            dir: dir.path().to_path_buf(),
            prefix: "input".into(),
        };
        let mut rng = StdRng::seed_from_u64(42);
        let subject = SubjectRunner::new(dir.path().join("absent"));

        let report = run_sweep(3, 6, layout.clone(), &mut rng, &subject).unwrap();
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.failed, 4);
        for n in 3..=6 {
            assert!(layout.path_for(n).is_file());
        }

        // Stand in for the subject's own metrics output.
        let metrics = dir.path().join("nT_data");
        let lines: String = report
            .results
            .iter()
            .map(|r| format!("{},{}\n", r.n, r.n * r.n))
            .collect();
        std::fs::write(&metrics, lines).unwrap();

        let series = load_series(&metrics).unwrap();
        assert_eq!(series.len(), 4);
        let chart = dir.path().join("nT_plot.svg");
        render(&series, &PlotStyle::default(), &chart).unwrap();
        assert!(std::fs::read_to_string(chart).unwrap().contains("<polyline"));
    }
}
