use owo_colors::{OwoColorize, Stream, Style};

use crate::report::format_value;
use crate::types::{AttemptOutcome, FileSummary, RunSummary};

// Style constants
fn style_index() -> Style {
    Style::new().cyan().bold()
}

fn style_heading() -> Style {
    Style::new().bold()
}

pub fn format_folder_start(exe_name: &str, folder: &str) -> String {
    format!("Running {} on files in folder: {}", exe_name, folder)
        .if_supports_color(Stream::Stdout, |s| s.style(style_heading()))
        .to_string()
}

pub fn format_file_start(exe_name: &str, folder: &str, file: &str) -> String {
    format!("Processing {} in {} using {}", file, folder, exe_name)
}

pub fn format_attempt(file: &str, attempt: usize, runs: usize) -> String {
    format!("Processing file {} run {}/{}", file, attempt, runs)
        .if_supports_color(Stream::Stdout, |s| s.dimmed())
        .to_string()
}

/// One stderr line describing a failed or unproductive attempt.
pub fn format_attempt_failure(exe_name: &str, file: &str, outcome: &AttemptOutcome) -> String {
    let detail = match outcome {
        AttemptOutcome::Measured => "no error".to_string(),
        AttemptOutcome::ExitFailure { code: Some(code), stderr } => {
            match stderr.lines().next() {
                Some(first) => format!("exited with status {}: {}", code, first),
                None => format!("exited with status {}", code),
            }
        }
        AttemptOutcome::ExitFailure { code: None, .. } => "terminated by signal".to_string(),
        AttemptOutcome::SpawnFailed { error } => format!("could not start: {}", error),
        AttemptOutcome::NoMetrics => "output contained no throughput or ratio line".to_string(),
    };

    format!("Error running {} for {}: {}", exe_name, file, detail)
        .if_supports_color(Stream::Stderr, |s| s.red())
        .to_string()
}

/// Median lines for a finished file, plus the attempt tally when any attempt
/// did not contribute cleanly.
pub fn format_file_medians(exe_name: &str, summary: &FileSummary) -> String {
    let mut out = format!(
        "Median throughput for {} on {}: {}\nMedian ratio for {} on {}: {}",
        exe_name,
        summary.name,
        format_value(summary.median_throughput),
        exe_name,
        summary.name,
        format_value(summary.median_ratio),
    );

    if !summary.attempts.is_clean() {
        out.push('\n');
        out.push_str(
            &format!("  attempts: {}", summary.attempts)
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string(),
        );
    }

    out
}

/// Final table of folder means, keyed by both report index and folder name.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    let header = format!("Results for {}:", summary.executable);
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.style(style_heading()))
            .to_string(),
    );
    out.push_str("\n\n");

    let name_width = summary
        .folders
        .iter()
        .map(|f| f.name.len())
        .chain(std::iter::once("overall".len()))
        .max()
        .unwrap_or(0);
    let index_width = summary.folders.len().to_string().len();

    out.push_str(&format!(
        "  {:>iw$}  {:<nw$}  {:>14}  {:>10}\n",
        "#",
        "folder",
        "throughput",
        "ratio",
        iw = index_width,
        nw = name_width
    ));

    let idx_style = style_index();
    for (i, folder) in summary.folders.iter().enumerate() {
        let idx_str = format!("{:>width$}", i + 1, width = index_width);
        let idx_colored = idx_str
            .if_supports_color(Stream::Stdout, |s| s.style(idx_style))
            .to_string();

        let name_colored = format!("{:<width$}", folder.name, width = name_width)
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string();

        out.push_str(&format!(
            "  {}  {}  {:>14.3}  {:>10.3}\n",
            idx_colored, name_colored, folder.throughput, folder.ratio
        ));
    }

    let overall = format!(
        "  {:>iw$}  {:<nw$}  {:>14.3}  {:>10.3}",
        "",
        "overall",
        summary.throughput,
        summary.ratio,
        iw = index_width,
        nw = name_width
    );
    out.push_str(
        &overall
            .if_supports_color(Stream::Stdout, |s| s.style(style_heading()))
            .to_string(),
    );
    out.push('\n');

    out
}

pub fn format_written(path: &std::path::Path) -> String {
    format!("Wrote {}", path.display())
        .if_supports_color(Stream::Stdout, |s| s.dimmed())
        .to_string()
}
