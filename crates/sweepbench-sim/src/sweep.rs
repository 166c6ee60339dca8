//! The size sweep: generate, write, invoke, record, for every size in range.

use crate::error::{BenchError, Result};
use crate::points;
use crate::report::{RunResult, SweepReport};
use crate::subject::Subject;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_START: usize = 10;
pub const DEFAULT_END: usize = 1000;

/// Inclusive range of input sizes, `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    start: usize,
    end: usize,
}

impl SizeRange {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 || start > end {
            return Err(BenchError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Where input files go and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub dir: PathBuf,
    pub prefix: String,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "input".to_string(),
        }
    }
}

impl InputLayout {
    /// `<dir>/<prefix><n>`; distinct for every `n`.
    pub fn path_for(&self, n: usize) -> PathBuf {
        let name = format!("{}{}", self.prefix, n);
        if self.dir == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.dir.join(name)
        }
    }
}

/// Progress notifications, delivered in order before the next size starts.
#[derive(Debug)]
pub enum SweepEvent<'a> {
    InputWritten { n: usize, path: &'a Path },
    Finished(&'a RunResult),
}

#[derive(Debug, Clone)]
pub struct Sweep {
    range: SizeRange,
    layout: InputLayout,
}

impl Sweep {
    pub fn new(range: SizeRange, layout: InputLayout) -> Self {
        Self { range, layout }
    }

    pub fn range(&self) -> SizeRange {
        self.range
    }

    pub fn run<R, S>(&self, rng: &mut R, subject: &S) -> Result<SweepReport>
    where
        R: Rng + ?Sized,
        S: Subject + ?Sized,
    {
        self.run_with(rng, subject, |_| {})
    }

    /// Run every size in range. Subject failures are recorded and the sweep
    /// continues; only an input file that cannot be written stops it.
    pub fn run_with<R, S, F>(&self, rng: &mut R, subject: &S, mut on_event: F) -> Result<SweepReport>
    where
        R: Rng + ?Sized,
        S: Subject + ?Sized,
        F: FnMut(SweepEvent<'_>),
    {
        let mut report = SweepReport::new(self.range.start, self.range.end);

        for n in self.range.sizes() {
            let path = self.layout.path_for(n);
            points::generate(n, rng).write_to(&path)?;
            tracing::info!(n, input = %path.display(), "input written");
            on_event(SweepEvent::InputWritten { n, path: &path });

            let start = Instant::now();
            let outcome = subject.invoke(&path);
            let duration_ms = start.elapsed().as_millis() as u64;

            let result = report.add_run(n, &path, outcome, duration_ms);
            match &result.message {
                None => tracing::info!(n, duration_ms, "subject succeeded"),
                Some(cause) => tracing::warn!(n, input = %path.display(), %cause, "subject failed"),
            }
            on_event(SweepEvent::Finished(result));
        }

        Ok(report)
    }
}

/// Convenience wrapper: validate `start..=end` and sweep it.
pub fn run_sweep<R, S>(
    start: usize,
    end: usize,
    layout: InputLayout,
    rng: &mut R,
    subject: &S,
) -> Result<SweepReport>
where
    R: Rng + ?Sized,
    S: Subject + ?Sized,
{
    Sweep::new(SizeRange::new(start, end)?, layout).run(rng, subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointSet;
    use crate::report::RunStatus;
    use crate::subject::{SubjectFailure, SubjectRunner};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    /// Records every call and fails for the sizes in `fail_on`.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<PathBuf>>,
        fail_on: Vec<usize>,
        layout: InputLayout,
    }

    impl Subject for Recorder {
        fn invoke(&self, input: &Path) -> std::result::Result<(), SubjectFailure> {
            self.calls.borrow_mut().push(input.to_path_buf());
            let text = std::fs::read_to_string(input).unwrap();
            let set = PointSet::parse(&text).unwrap();
            if self
                .fail_on
                .iter()
                .any(|&n| self.layout.path_for(n) == input)
            {
                return Err(SubjectFailure::NonZeroExit {
                    code: Some(1),
                    stderr: format!("rejected {} points", set.len()),
                });
            }
            Ok(())
        }

        fn describe(&self, input: &Path) -> String {
            format!("recorder {}", input.display())
        }
    }

    fn layout_in(dir: &Path) -> InputLayout {
        InputLayout {
            dir: dir.to_path_buf(),
            prefix: "input".into(),
        }
    }

    #[test]
    fn single_size_runs_one_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let subject = Recorder {
            layout: layout.clone(),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let report = run_sweep(5, 5, layout.clone(), &mut rng, &subject).unwrap();

        assert_eq!(*subject.calls.borrow(), vec![layout.path_for(5)]);
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.results[0].n, 5);
        let text = std::fs::read_to_string(layout.path_for(5)).unwrap();
        assert_eq!(PointSet::parse(&text).unwrap().len(), 5);
    }

    #[test]
    fn reversed_range_fails_before_any_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let subject = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);

        let err = run_sweep(3, 1, layout_in(dir.path()), &mut rng, &subject).unwrap_err();

        assert!(matches!(err, BenchError::InvalidRange { start: 3, end: 1 }));
        assert!(subject.calls.borrow().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn zero_start_is_invalid() {
        assert!(matches!(
            SizeRange::new(0, 4),
            Err(BenchError::InvalidRange { start: 0, end: 4 })
        ));
    }

    #[test]
    fn failures_do_not_stop_the_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let subject = Recorder {
            fail_on: vec![2, 4],
            layout: layout.clone(),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(9);

        let report = run_sweep(1, 5, layout, &mut rng, &subject).unwrap();

        assert_eq!(subject.calls.borrow().len(), 5);
        assert_eq!(report.summary.succeeded, 3);
        let failed: Vec<(usize, Option<&str>)> = report
            .failures()
            .map(|r| (r.n, r.message.as_deref()))
            .collect();
        assert_eq!(
            failed,
            vec![
                (2, Some("exit status 1: rejected 2 points")),
                (4, Some("exit status 1: rejected 4 points")),
            ]
        );
    }

    #[test]
    fn missing_executable_is_recorded_and_sweep_proceeds() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SubjectRunner::new(dir.path().join("no-such-subject"));
        let mut rng = StdRng::seed_from_u64(3);

        let report = run_sweep(2, 3, layout_in(dir.path()), &mut rng, &runner).unwrap();

        assert_eq!(report.summary.failed, 2);
        for (r, n) in report.results.iter().zip(2..) {
            assert_eq!(r.n, n);
            assert_eq!(r.status, RunStatus::Failed);
            assert_eq!(r.failure_kind.as_deref(), Some("spawn_error"));
        }
    }

    #[test]
    fn events_arrive_in_order_per_size() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let subject = Recorder {
            layout: layout.clone(),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let sweep = Sweep::new(SizeRange::new(7, 8).unwrap(), layout);

        let mut seen = Vec::new();
        sweep
            .run_with(&mut rng, &subject, |ev| match ev {
                SweepEvent::InputWritten { n, .. } => seen.push(format!("written {n}")),
                SweepEvent::Finished(r) => seen.push(format!("finished {}", r.n)),
            })
            .unwrap();

        assert_eq!(seen, ["written 7", "finished 7", "written 8", "finished 8"]);
    }

    #[test]
    fn unwritable_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let subject = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);

        let err = run_sweep(1, 2, layout_in(&dir.path().join("gone")), &mut rng, &subject)
            .unwrap_err();

        assert!(matches!(err, BenchError::Io { .. }));
        assert!(subject.calls.borrow().is_empty());
    }

    #[test]
    fn default_layout_uses_bare_filenames() {
        assert_eq!(InputLayout::default().path_for(10), PathBuf::from("input10"));
    }
}
