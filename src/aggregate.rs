use anyhow::Result;

use crate::errors::{CompRunError, StatsError};
use crate::stats::{geometric_mean, median};
use crate::types::{FileSummary, FolderSummary, MeasurementSet, RunSummary};

/// Reduce one file's samples to their medians.
///
/// An empty throughput or ratio sequence is an error naming the file and
/// its attempt tally; it is never coerced to zero.
pub fn summarize_file(set: &MeasurementSet) -> Result<FileSummary> {
    let tally = set.tally();
    let file_median = |values: &[f64], metric: &'static str| -> Result<f64> {
        median(values).map_err(|e| -> anyhow::Error {
            match e {
                StatsError::Empty => CompRunError::NoSamples {
                    path: set.file.path.clone(),
                    metric,
                    tally: tally.to_string(),
                }
                .into(),
                source => CompRunError::Aggregate {
                    context: set.file.path.display().to_string(),
                    metric,
                    source,
                }
                .into(),
            }
        })
    };

    Ok(FileSummary {
        name: set.file.name.clone(),
        median_throughput: file_median(&set.throughputs, "throughput")?,
        median_ratio: file_median(&set.ratios, "ratio")?,
        attempts: tally,
    })
}

/// Geometric means of the per-file medians in one folder.
pub fn summarize_folder(name: &str, files: Vec<FileSummary>) -> Result<FolderSummary> {
    if files.is_empty() {
        return Err(CompRunError::EmptyFolder {
            folder: name.to_string(),
        }
        .into());
    }

    let context = format!("folder '{}'", name);
    let throughputs: Vec<f64> = files.iter().map(|f| f.median_throughput).collect();
    let ratios: Vec<f64> = files.iter().map(|f| f.median_ratio).collect();

    Ok(FolderSummary {
        name: name.to_string(),
        throughput: gmean(&throughputs, &context, "throughput")?,
        ratio: gmean(&ratios, &context, "ratio")?,
        files,
    })
}

/// Geometric means across the folder-level geometric means.
pub fn summarize_run(executable: &str, folders: Vec<FolderSummary>) -> Result<RunSummary> {
    let context = "all folders".to_string();
    let throughputs: Vec<f64> = folders.iter().map(|f| f.throughput).collect();
    let ratios: Vec<f64> = folders.iter().map(|f| f.ratio).collect();

    Ok(RunSummary {
        executable: executable.to_string(),
        throughput: gmean(&throughputs, &context, "throughput")?,
        ratio: gmean(&ratios, &context, "ratio")?,
        folders,
    })
}

fn gmean(values: &[f64], context: &str, metric: &'static str) -> Result<f64> {
    geometric_mean(values).map_err(|source| -> anyhow::Error {
        CompRunError::Aggregate {
            context: context.to_string(),
            metric,
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttemptOutcome, AttemptTally, SampleFile};
    use std::path::PathBuf;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn measured(throughputs: &[f64], ratios: &[f64]) -> MeasurementSet {
        let mut set = MeasurementSet::new(SampleFile {
            name: "f.bin".to_string(),
            path: PathBuf::from("/data/text/f.bin"),
        });
        set.throughputs = throughputs.to_vec();
        set.ratios = ratios.to_vec();
        set.outcomes = vec![AttemptOutcome::Measured; throughputs.len().max(ratios.len())];
        set
    }

    fn file(throughput: f64, ratio: f64) -> FileSummary {
        FileSummary {
            name: "f".to_string(),
            median_throughput: throughput,
            median_ratio: ratio,
            attempts: AttemptTally::default(),
        }
    }

    #[test]
    fn file_medians() {
        let set = measured(&[100.0, 110.0, 120.0, 130.0, 140.0], &[2.0; 5]);
        let summary = summarize_file(&set).unwrap();
        assert_eq!(summary.median_throughput, 120.0);
        assert_eq!(summary.median_ratio, 2.0);
        assert_eq!(summary.attempts.measured, 5);
    }

    #[test]
    fn file_with_uneven_sample_counts() {
        let set = measured(&[10.0, 30.0], &[1.0, 2.0, 9.0]);
        let summary = summarize_file(&set).unwrap();
        assert_eq!(summary.median_throughput, 20.0);
        assert_eq!(summary.median_ratio, 2.0);
    }

    #[test]
    fn file_without_samples_is_explicit_error() {
        let mut set = measured(&[], &[]);
        set.outcomes = vec![
            AttemptOutcome::ExitFailure { code: Some(1), stderr: String::new() };
            5
        ];
        let err = summarize_file(&set).unwrap_err();
        match err.downcast_ref::<CompRunError>() {
            Some(CompRunError::NoSamples { metric, tally, .. }) => {
                assert_eq!(*metric, "throughput");
                assert!(tally.contains("5 exit failures"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_ratio_alone_is_an_error() {
        let set = measured(&[5.0], &[]);
        let err = summarize_file(&set).unwrap_err();
        assert!(err.to_string().contains("No ratio samples"));
    }

    #[test]
    fn folder_geometric_mean() {
        let folder = summarize_folder("text", vec![file(100.0, 1.0), file(400.0, 4.0)]).unwrap();
        assert!(close(folder.throughput, 200.0));
        assert!(close(folder.ratio, 2.0));
        assert_eq!(folder.name, "text");
        assert_eq!(folder.files.len(), 2);
    }

    #[test]
    fn empty_folder_is_error() {
        let err = summarize_folder("empty", vec![]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompRunError>(),
            Some(CompRunError::EmptyFolder { .. })
        ));
    }

    #[test]
    fn zero_median_fails_loudly() {
        let err = summarize_folder("zeros", vec![file(0.0, 2.0), file(10.0, 2.0)]).unwrap_err();
        match err.downcast_ref::<CompRunError>() {
            Some(CompRunError::Aggregate { metric, source, .. }) => {
                assert_eq!(*metric, "throughput");
                assert_eq!(*source, StatsError::NonPositive(0.0));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn overall_is_geometric_not_arithmetic() {
        let a = summarize_folder("a", vec![file(100.0, 2.0)]).unwrap();
        let b = summarize_folder("b", vec![file(400.0, 8.0)]).unwrap();
        let run = summarize_run("zip", vec![a, b]).unwrap();
        assert!(close(run.throughput, 200.0));
        assert!(close(run.ratio, 4.0));
        assert!((run.throughput - 250.0).abs() > 1.0);
        assert_eq!(run.executable, "zip");
        assert_eq!(run.folders[0].name, "a");
        assert_eq!(run.folders[1].name, "b");
    }

    #[test]
    fn run_without_folders_is_error() {
        assert!(summarize_run("zip", vec![]).is_err());
    }
}
