use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use comprun::bench;
use comprun::display;
use comprun::parse::MarkerParser;
use comprun::report;
use comprun::types::BenchConfig;

#[derive(Parser)]
#[command(
    name = "comprun",
    version,
    about = "Benchmark a compressor over folders of sample files"
)]
struct Cli {
    /// Directory whose subfolders hold the sample files
    input_dir: PathBuf,

    /// Directory containing the compressor
    exe_dir: PathBuf,

    /// Compressor file name; also names the report
    exe_file: String,

    /// Executions per sample file
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Third argument passed to the compressor
    #[arg(long, default_value = "y")]
    flag: String,

    /// Name of the per-folder directory receiving compressed output
    #[arg(long, default_value = "compressed")]
    output_dir: String,

    /// Extension of compressed output files
    #[arg(long, default_value = "comp")]
    extension: String,

    /// Also write <exe_file>_metrics.json with folder names and per-file detail
    #[arg(long)]
    json: bool,

    /// Only print errors and the final summary
    #[arg(short, long)]
    quiet: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = BenchConfig {
        executable: cli.exe_dir.join(&cli.exe_file),
        exe_name: cli.exe_file,
        input_dir: cli.input_dir,
        runs: cli.runs,
        flag: cli.flag,
        output_dir_name: cli.output_dir,
        extension: cli.extension,
        quiet: cli.quiet,
    };

    let summary = bench::run_benchmark(&config, &MarkerParser::default())?;

    let text_path = report::report_path(&config.input_dir, &config.exe_name, "txt");
    report::write_report(&text_path, &report::render_text(&summary))?;

    let json_path = if cli.json {
        let path = report::report_path(&config.input_dir, &config.exe_name, "json");
        report::write_report(&path, &report::render_json(&summary, config.runs, Utc::now()))?;
        Some(path)
    } else {
        None
    };

    print!("\n{}", display::format_summary(&summary));
    println!("{}", display::format_written(&text_path));
    if let Some(path) = json_path {
        println!("{}", display::format_written(&path));
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
