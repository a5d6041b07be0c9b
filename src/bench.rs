use anyhow::Result;

use crate::aggregate;
use crate::discover;
use crate::display;
use crate::errors::CompRunError;
use crate::invoke;
use crate::parse::MetricParser;
use crate::types::{BenchConfig, RunSummary};

/// Check the configuration before any directory is created or process started.
pub fn validate(config: &BenchConfig) -> Result<()> {
    if config.runs == 0 {
        return Err(CompRunError::InvalidRunCount { runs: config.runs }.into());
    }
    if !config.input_dir.is_dir() {
        return Err(CompRunError::InputDirNotFound {
            path: config.input_dir.clone(),
        }
        .into());
    }
    if !config.executable.is_file() {
        return Err(CompRunError::ExecutableNotFound {
            path: config.executable.clone(),
        }
        .into());
    }
    Ok(())
}

/// Benchmark every sample folder under `config.input_dir`, one folder, file
/// and attempt at a time, and aggregate the results.
///
/// Attempt failures are reported and skipped; a file with no samples, an
/// empty folder or a non-positive median aborts the whole run.
pub fn run_benchmark(config: &BenchConfig, parser: &dyn MetricParser) -> Result<RunSummary> {
    validate(config)?;

    let folders = discover::discover_folders(&config.input_dir)?;
    if folders.is_empty() {
        return Err(CompRunError::NoFolders {
            path: config.input_dir.clone(),
        }
        .into());
    }

    let mut folder_summaries = Vec::with_capacity(folders.len());

    for (name, path) in &folders {
        let folder = discover::prepare_folder(name, path, &config.output_dir_name)?;

        if !config.quiet {
            println!("{}", display::format_folder_start(&config.exe_name, &folder.name));
        }

        let mut file_summaries = Vec::with_capacity(folder.files.len());
        for file in &folder.files {
            if !config.quiet {
                println!(
                    "{}",
                    display::format_file_start(&config.exe_name, &folder.name, &file.name)
                );
            }

            let output = discover::output_path_for(file, &folder.output_dir, &config.extension);
            let set = invoke::run_file(config, parser, file, &output);
            let summary = aggregate::summarize_file(&set)?;

            if !config.quiet {
                println!("{}", display::format_file_medians(&config.exe_name, &summary));
            }
            file_summaries.push(summary);
        }

        folder_summaries.push(aggregate::summarize_folder(&folder.name, file_summaries)?);
    }

    aggregate::summarize_run(&config.exe_name, folder_summaries)
}
