use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CompRunError;
use crate::types::{FileSummary, RunSummary};

/// `<input_dir>/<exe_name>_metrics.<extension>`
pub fn report_path(input_dir: &Path, exe_name: &str, extension: &str) -> PathBuf {
    input_dir.join(format!("{}_metrics.{}", exe_name, extension))
}

/// Shortest round-trip rendering that always keeps a decimal point (`120.0`).
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// Render the plain-text metrics report.
///
/// Folders are numbered by processing position starting at 1.
pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let exe = &summary.executable;

    let _ = writeln!(out, "Geometric mean of median throughputs for {}:", exe);
    for (i, folder) in summary.folders.iter().enumerate() {
        let _ = writeln!(out, "  Subfolder {}: {}", i + 1, format_value(folder.throughput));
    }
    let _ = writeln!(out, "Overall geometric mean: {}", format_value(summary.throughput));
    out.push('\n');

    let _ = writeln!(out, "Geometric mean of median ratios for {}:", exe);
    for (i, folder) in summary.folders.iter().enumerate() {
        let _ = writeln!(out, "  Subfolder {}: {}", i + 1, format_value(folder.ratio));
    }
    let _ = writeln!(out, "Overall geometric mean: {}", format_value(summary.ratio));

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    executable: &'a str,
    generated_at: String,
    runs_per_file: usize,
    folders: Vec<JsonFolder<'a>>,
    overall: JsonMeans,
}

#[derive(Serialize)]
struct JsonFolder<'a> {
    index: usize,
    name: &'a str,
    throughput: f64,
    ratio: f64,
    files: &'a [FileSummary],
}

#[derive(Serialize)]
struct JsonMeans {
    throughput: f64,
    ratio: f64,
}

/// JSON summary carrying folder names alongside their report indices.
pub fn render_json(summary: &RunSummary, runs_per_file: usize, now: DateTime<Utc>) -> String {
    let report = JsonReport {
        executable: &summary.executable,
        generated_at: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        runs_per_file,
        folders: summary
            .folders
            .iter()
            .enumerate()
            .map(|(i, folder)| JsonFolder {
                index: i + 1,
                name: &folder.name,
                throughput: folder.throughput,
                ratio: folder.ratio,
                files: &folder.files,
            })
            .collect(),
        overall: JsonMeans {
            throughput: summary.throughput,
            ratio: summary.ratio,
        },
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Write `contents` to `path`, replacing any previous report.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| CompRunError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttemptTally, FolderSummary};

    fn folder(name: &str, throughput: f64, ratio: f64) -> FolderSummary {
        FolderSummary {
            name: name.to_string(),
            files: vec![FileSummary {
                name: format!("{}.bin", name),
                median_throughput: throughput,
                median_ratio: ratio,
                attempts: AttemptTally {
                    measured: 5,
                    ..AttemptTally::default()
                },
            }],
            throughput,
            ratio,
        }
    }

    fn summary() -> RunSummary {
        RunSummary {
            executable: "lzfast".to_string(),
            folders: vec![folder("images", 100.0, 1.5), folder("text", 400.0, 6.0)],
            throughput: 200.0,
            ratio: 3.0,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-17T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(120.0), "120.0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.125), "0.125");
    }

    #[test]
    fn text_report_exact_layout() {
        let expected = "\
Geometric mean of median throughputs for lzfast:
  Subfolder 1: 100.0
  Subfolder 2: 400.0
Overall geometric mean: 200.0

Geometric mean of median ratios for lzfast:
  Subfolder 1: 1.5
  Subfolder 2: 6.0
Overall geometric mean: 3.0
";
        assert_eq!(render_text(&summary()), expected);
    }

    #[test]
    fn report_path_named_after_executable() {
        assert_eq!(
            report_path(Path::new("/bench/inputs"), "lzfast", "txt"),
            PathBuf::from("/bench/inputs/lzfast_metrics.txt")
        );
    }

    #[test]
    fn json_report_carries_folder_names() {
        let json = render_json(&summary(), 5, fixed_now());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["executable"], "lzfast");
        assert_eq!(parsed["generated_at"], "2026-10-17T12:00:00Z");
        assert_eq!(parsed["runs_per_file"], 5);
        assert_eq!(parsed["folders"][0]["index"], 1);
        assert_eq!(parsed["folders"][0]["name"], "images");
        assert_eq!(parsed["folders"][1]["name"], "text");
        assert_eq!(parsed["folders"][1]["files"][0]["name"], "text.bin");
        assert_eq!(parsed["folders"][1]["files"][0]["attempts"]["measured"], 5);
        assert_eq!(parsed["overall"]["throughput"], 200.0);
        assert_eq!(parsed["overall"]["ratio"], 3.0);
    }

    #[test]
    fn write_report_overwrites() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("x_metrics.txt");
        write_report(&path, "first").unwrap();
        write_report(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_report_into_missing_dir_fails() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("x_metrics.txt");
        let err = write_report(&path, "data").unwrap_err();
        assert!(err.to_string().contains("Failed to write report"));
    }
}
