use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Validated settings for one benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub input_dir: PathBuf,
    pub executable: PathBuf,
    /// File name of the executable, used in messages and report names.
    pub exe_name: String,
    pub runs: usize,
    /// Literal third argument handed to the executable.
    pub flag: String,
    pub output_dir_name: String,
    pub extension: String,
    /// Suppress progress lines on stdout.
    pub quiet: bool,
}

/// One immediate subdirectory of the input root.
#[derive(Debug, Clone)]
pub struct SampleFolder {
    pub name: String,
    pub path: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<SampleFile>,
}

#[derive(Debug, Clone)]
pub struct SampleFile {
    pub name: String,
    pub path: PathBuf,
}

/// What happened on a single execution of the compressor.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Exited zero and at least one marker line yielded a value.
    Measured,
    /// Exited non-zero (or was killed by a signal when `code` is `None`).
    ExitFailure { code: Option<i32>, stderr: String },
    /// The process could not be started at all.
    SpawnFailed { error: String },
    /// Exited zero but printed no usable marker line.
    NoMetrics,
}

/// Raw samples collected for one sample file across all attempts.
#[derive(Debug, Clone)]
pub struct MeasurementSet {
    pub file: SampleFile,
    pub throughputs: Vec<f64>,
    pub ratios: Vec<f64>,
    pub outcomes: Vec<AttemptOutcome>,
    /// Marker lines whose value token was missing or not a number.
    pub malformed_lines: usize,
}

impl MeasurementSet {
    pub fn new(file: SampleFile) -> Self {
        MeasurementSet {
            file,
            throughputs: Vec::new(),
            ratios: Vec::new(),
            outcomes: Vec::new(),
            malformed_lines: 0,
        }
    }

    pub fn tally(&self) -> AttemptTally {
        let mut tally = AttemptTally::default();
        for outcome in &self.outcomes {
            match outcome {
                AttemptOutcome::Measured => tally.measured += 1,
                AttemptOutcome::ExitFailure { .. } => tally.exit_failures += 1,
                AttemptOutcome::SpawnFailed { .. } => tally.spawn_failures += 1,
                AttemptOutcome::NoMetrics => tally.no_metrics += 1,
            }
        }
        tally.malformed_lines = self.malformed_lines;
        tally
    }
}

/// Per-category attempt counts for a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttemptTally {
    pub measured: usize,
    pub exit_failures: usize,
    pub spawn_failures: usize,
    pub no_metrics: usize,
    pub malformed_lines: usize,
}

impl AttemptTally {
    pub fn attempts(&self) -> usize {
        self.measured + self.exit_failures + self.spawn_failures + self.no_metrics
    }

    pub fn is_clean(&self) -> bool {
        self.measured == self.attempts() && self.malformed_lines == 0
    }
}

impl fmt::Display for AttemptTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ok, {} exit failures, {} spawn failures, {} without metrics, {} malformed lines",
            self.measured,
            self.attempts(),
            self.exit_failures,
            self.spawn_failures,
            self.no_metrics,
            self.malformed_lines
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub median_throughput: f64,
    pub median_ratio: f64,
    pub attempts: AttemptTally,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderSummary {
    pub name: String,
    pub files: Vec<FileSummary>,
    pub throughput: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub executable: String,
    pub folders: Vec<FolderSummary>,
    pub throughput: f64,
    pub ratio: f64,
}
