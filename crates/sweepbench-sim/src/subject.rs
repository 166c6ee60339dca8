//! Subprocess invocation of the program under test.
//!
//! The subject is run as `<program> <input>` and waited on synchronously.
//! Only the exit status is interpreted; stdout is passed through to the
//! terminal and stderr is captured for diagnostics.
//!
//! There is no timeout. A subject that never exits blocks the sweep until the
//! harness process itself is terminated.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Cap on captured stderr kept for diagnostics.
const MAX_STDERR_BYTES: usize = 4096;

/// Why a single invocation failed. Never fatal to a sweep.
#[derive(Debug, thiserror::Error)]
pub enum SubjectFailure {
    /// The program could not be launched (missing, not executable, ...).
    #[error("failed to launch {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The program ran and reported failure. `code` is `None` when it was
    /// terminated by a signal.
    #[error("{}", describe_exit(*code, stderr))]
    NonZeroExit { code: Option<i32>, stderr: String },
}

impl SubjectFailure {
    /// Stable identifier used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn_error",
            Self::NonZeroExit { .. } => "non_zero_exit",
        }
    }
}

fn describe_exit(code: Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    };
    let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty());
    match last_line {
        Some(line) => format!("{status}: {}", line.trim()),
        None => status,
    }
}

/// Something that can be run against a generated input file.
pub trait Subject {
    fn invoke(&self, input: &Path) -> Result<(), SubjectFailure>;

    /// Human-readable command line for `input`, used in progress output.
    fn describe(&self, input: &Path) -> String;
}

/// Runs an external executable with the input filename as its only argument.
#[derive(Debug, Clone)]
pub struct SubjectRunner {
    program: PathBuf,
    working_dir: Option<PathBuf>,
}

impl SubjectRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    /// Run the subject from `dir` instead of the harness's own working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Subject for SubjectRunner {
    fn invoke(&self, input: &Path) -> Result<(), SubjectFailure> {
        let spawn_failure = |source: io::Error| SubjectFailure::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        match &self.working_dir {
            // Inputs are named relative to the harness, not the subject.
            Some(dir) => {
                let input = std::path::absolute(input).map_err(spawn_failure)?;
                cmd.arg(input).current_dir(dir);
            }
            None => {
                cmd.arg(input);
            }
        }

        tracing::debug!(program = %self.program.display(), input = %input.display(), "spawning subject");

        let output = cmd.output().map_err(spawn_failure)?;

        if output.status.success() {
            return Ok(());
        }

        let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        truncate_tail(&mut stderr, MAX_STDERR_BYTES);
        Err(SubjectFailure::NonZeroExit {
            code: output.status.code(),
            stderr,
        })
    }

    fn describe(&self, input: &Path) -> String {
        format!("{} {}", self.program.display(), input.display())
    }
}

/// Keep at most `max` bytes from the end of `s`, on a char boundary.
fn truncate_tail(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = s.len() - max;
    while !s.is_char_boundary(cut) {
        cut += 1;
    }
    s.drain(..cut);
}
