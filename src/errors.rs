use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CompRunError {
    #[error("Input directory {path} does not exist or is not a directory")]
    InputDirNotFound { path: PathBuf },

    #[error("Executable {path} does not exist or is not a file")]
    ExecutableNotFound { path: PathBuf },

    #[error("Run count must be at least 1 (got {runs})")]
    InvalidRunCount { runs: usize },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No sample folders found in {path}")]
    NoFolders { path: PathBuf },

    #[error("Folder '{folder}' contains no sample files")]
    EmptyFolder { folder: String },

    #[error("No {metric} samples for {path} ({tally})")]
    NoSamples {
        path: PathBuf,
        metric: &'static str,
        tally: String,
    },

    #[error("Cannot aggregate {metric} for {context}: {source}")]
    Aggregate {
        context: String,
        metric: &'static str,
        source: StatsError,
    },

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures of the statistics helpers in [`crate::stats`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("no values")]
    Empty,

    #[error("non-positive value {0} has no logarithm")]
    NonPositive(f64),

    #[error("non-finite value {0}")]
    NotFinite(f64),
}
