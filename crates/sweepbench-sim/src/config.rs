//! Optional YAML configuration.
//!
//! Every field has a default, so a missing file or an empty one behaves like
//! the built-in settings. Command-line flags are applied on top by the CLI.

use crate::error::{BenchError, Result};
use crate::metrics::DEFAULT_METRICS_FILE;
use crate::plot::{PlotStyle, DEFAULT_CHART_FILE};
use crate::subject::SubjectRunner;
use crate::sweep::{InputLayout, DEFAULT_END, DEFAULT_START};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "sweepbench.yaml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Program under test, invoked as `<program> <input>`.
    pub program: PathBuf,
    /// Working directory for the program. Defaults to the harness's own.
    pub working_dir: Option<PathBuf>,
    pub sizes: SizesConfig,
    pub inputs: InputsConfig,
    /// Seed for the point generator; entropy when unset.
    pub seed: Option<u64>,
    /// `n,t` file read by `plot`.
    pub metrics: PathBuf,
    /// Chart written by `plot`.
    pub chart: PathBuf,
    pub plot: PlotStyle,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("./main"),
            working_dir: None,
            sizes: SizesConfig::default(),
            inputs: InputsConfig::default(),
            seed: None,
            metrics: PathBuf::from(DEFAULT_METRICS_FILE),
            chart: PathBuf::from(DEFAULT_CHART_FILE),
            plot: PlotStyle::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SizesConfig {
    pub start: usize,
    pub end: usize,
}

impl Default for SizesConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    pub dir: PathBuf,
    pub prefix: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        let layout = InputLayout::default();
        Self {
            dir: layout.dir,
            prefix: layout.prefix,
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
        Self::parse(&text, path)
    }

    /// Load `explicit` if given, otherwise `sweepbench.yaml` in the current
    /// directory if it exists, otherwise defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| BenchError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn input_layout(&self) -> InputLayout {
        InputLayout {
            dir: self.inputs.dir.clone(),
            prefix: self.inputs.prefix.clone(),
        }
    }

    pub fn subject(&self) -> SubjectRunner {
        let runner = SubjectRunner::new(&self.program);
        match &self.working_dir {
            Some(dir) => runner.with_working_dir(dir),
            None => runner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let cfg = BenchConfig::parse("  \n", Path::new("sweepbench.yaml")).unwrap();
        assert_eq!(cfg, BenchConfig::default());
        assert_eq!(cfg.sizes.start, 10);
        assert_eq!(cfg.sizes.end, 1000);
        assert_eq!(cfg.metrics, PathBuf::from("nT_data"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r##"
program: ./layers
sizes:
  end: 50
plot:
  title: "Maximal layers"
  line_color: "#000000"
"##;
        let cfg = BenchConfig::parse(yaml, Path::new("sweepbench.yaml")).unwrap();
        assert_eq!(cfg.program, PathBuf::from("./layers"));
        assert_eq!(cfg.sizes.start, 10);
        assert_eq!(cfg.sizes.end, 50);
        assert_eq!(cfg.plot.title, "Maximal layers");
        assert_eq!(cfg.plot.line_color, "#000000");
        assert_eq!(cfg.plot.x_label, "n");
        assert_eq!(cfg.input_layout(), InputLayout::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = BenchConfig::parse("progam: ./main\n", Path::new("cfg.yaml")).unwrap_err();
        match err {
            BenchError::Config { path, message } => {
                assert_eq!(path, PathBuf::from("cfg.yaml"));
                assert!(message.contains("progam"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchConfig::resolve(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "seed: 7\ninputs:\n  prefix: case\n").unwrap();

        let cfg = BenchConfig::load(&path).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.input_layout().path_for(3), PathBuf::from("case3"));
    }
}
