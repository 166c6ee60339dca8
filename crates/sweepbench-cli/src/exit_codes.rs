//! Exit codes of the `sweepbench` binary.
//! Subject program failures never change the exit code of `generate`.

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2; // Invalid size range, bad config, usage
pub const EXIT_DATA_ERROR: i32 = 3; // Malformed metrics file
pub const EXIT_IO_ERROR: i32 = 4; // File could not be read or written

use sweepbench_sim::BenchError;

pub fn for_error(err: &BenchError) -> i32 {
    match err {
        BenchError::InvalidRange { .. } | BenchError::Config { .. } => EXIT_CONFIG_ERROR,
        BenchError::Format { .. } => EXIT_DATA_ERROR,
        BenchError::Io { .. } => EXIT_IO_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn bench_errors_map_to_documented_codes() {
        let cases = [
            (BenchError::InvalidRange { start: 3, end: 1 }, EXIT_CONFIG_ERROR),
            (
                BenchError::Config {
                    path: PathBuf::from("sweepbench.yaml"),
                    message: "bad".into(),
                },
                EXIT_CONFIG_ERROR,
            ),
            (
                BenchError::Format {
                    line: 1,
                    reason: "bad".into(),
                },
                EXIT_DATA_ERROR,
            ),
            (
                BenchError::Io {
                    path: PathBuf::from("nT_data"),
                    source: std::io::ErrorKind::NotFound.into(),
                },
                EXIT_IO_ERROR,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(for_error(&err), code, "{err}");
        }
    }
}
