use std::path::Path;
use std::process::Command;

use crate::display;
use crate::parse::MetricParser;
use crate::types::{AttemptOutcome, BenchConfig, MeasurementSet, SampleFile};

/// Run `<executable> <input> <output> <flag>` once, blocking until it exits.
///
/// Returns the captured stdout on a zero exit status, otherwise the failure
/// as an [`AttemptOutcome`].
pub fn execute_once(
    executable: &Path,
    input: &Path,
    output: &Path,
    flag: &str,
) -> Result<String, AttemptOutcome> {
    let result = Command::new(executable)
        .arg(input)
        .arg(output)
        .arg(flag)
        .output();

    let out = match result {
        Ok(o) => o,
        Err(e) => {
            return Err(AttemptOutcome::SpawnFailed {
                error: e.to_string(),
            });
        }
    };

    if !out.status.success() {
        return Err(AttemptOutcome::ExitFailure {
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// Execute the compressor `config.runs` times on `file` and collect samples.
///
/// Failed attempts and attempts without usable output are recorded in the
/// returned set's outcomes and contribute no samples; they never abort the run.
pub fn run_file(
    config: &BenchConfig,
    parser: &dyn MetricParser,
    file: &SampleFile,
    output: &Path,
) -> MeasurementSet {
    let mut set = MeasurementSet::new(file.clone());

    for attempt in 1..=config.runs {
        if !config.quiet {
            println!("{}", display::format_attempt(&file.name, attempt, config.runs));
        }

        let outcome = match execute_once(&config.executable, &file.path, output, &config.flag) {
            Ok(stdout) => {
                let parsed = parser.parse(&stdout);
                set.malformed_lines += parsed.malformed_lines;
                if parsed.is_empty() {
                    AttemptOutcome::NoMetrics
                } else {
                    set.throughputs.extend(parsed.throughputs);
                    set.ratios.extend(parsed.ratios);
                    AttemptOutcome::Measured
                }
            }
            Err(failure) => failure,
        };

        if outcome != AttemptOutcome::Measured {
            eprintln!(
                "{}",
                display::format_attempt_failure(&config.exe_name, &file.name, &outcome)
            );
        }

        set.outcomes.push(outcome);
    }

    set
}
