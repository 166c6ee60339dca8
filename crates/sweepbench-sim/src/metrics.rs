//! `n,t` records written by the subject program.

use crate::error::{BenchError, Result};
use std::path::Path;

pub const DEFAULT_METRICS_FILE: &str = "nT_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSample {
    pub n: i64,
    pub t: i64,
}

/// Samples in file order. Neither `n` nor `t` is assumed unique or sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSeries {
    samples: Vec<MetricSample>,
}

impl MetricSeries {
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<MetricSample>> for MetricSeries {
    fn from(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<(i64, i64)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(n, t)| MetricSample { n, t })
            .collect::<Vec<_>>()
            .into()
    }
}

pub fn load_series(path: &Path) -> Result<MetricSeries> {
    let text = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    parse_series(&text)
}

/// Parse one `n,t` pair per non-empty line. Any malformed line fails the whole parse.
pub fn parse_series(text: &str) -> Result<MetricSeries> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        samples.push(parse_sample(line).map_err(|reason| BenchError::format(idx + 1, reason))?);
    }
    Ok(MetricSeries { samples })
}

fn parse_sample(line: &str) -> std::result::Result<MetricSample, String> {
    let fields: Vec<&str> = line.split(',').collect();
    let [n, t] = fields.as_slice() else {
        return Err(format!("expected 2 comma-separated fields, found {}", fields.len()));
    };
    let int = |tok: &str| {
        tok.trim()
            .parse::<i64>()
            .map_err(|_| format!("not an integer: {:?}", tok.trim()))
    };
    Ok(MetricSample {
        n: int(*n)?,
        t: int(*t)?,
    })
}
