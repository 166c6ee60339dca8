//! Per-size outcomes of a sweep and the optional JSON report.

use crate::error::{BenchError, Result};
use crate::subject::SubjectFailure;
use serde::Serialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Clone)]
pub struct SweepReport {
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Seed of the point generator, when the sweep was seeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub summary: SweepSummary,
    pub results: Vec<RunResult>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Outcome of one generate+invoke iteration.
#[derive(Debug, Serialize, Clone)]
pub struct RunResult {
    pub n: usize,
    pub input: PathBuf,
    pub status: RunStatus,
    /// `spawn_error` or `non_zero_exit`
    pub failure_kind: Option<String>,
    pub message: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    Failed,
}

impl SweepReport {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            program: None,
            seed: None,
            summary: SweepSummary::default(),
            results: Vec::new(),
        }
    }

    /// Record the outcome for size `n` and return the stored result.
    pub fn add_run(
        &mut self,
        n: usize,
        input: &Path,
        outcome: std::result::Result<(), SubjectFailure>,
        duration_ms: u64,
    ) -> &RunResult {
        self.summary.total += 1;
        let res = match outcome {
            Ok(()) => {
                self.summary.succeeded += 1;
                RunResult {
                    n,
                    input: input.to_path_buf(),
                    status: RunStatus::Succeeded,
                    failure_kind: None,
                    message: None,
                    duration_ms,
                }
            }
            Err(e) => {
                self.summary.failed += 1;
                RunResult {
                    n,
                    input: input.to_path_buf(),
                    status: RunStatus::Failed,
                    failure_kind: Some(e.kind().to_string()),
                    message: Some(e.to_string()),
                    duration_ms,
                }
            }
        };
        self.results.push(res);
        &self.results[self.results.len() - 1]
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunResult> {
        self.results
            .iter()
            .filter(|r| r.status == RunStatus::Failed)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| BenchError::io(path, e))?;
        let mut out = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, self).map_err(|e| BenchError::io(path, e.into()))?;
        out.flush().map_err(|e| BenchError::io(path, e))
    }
}
