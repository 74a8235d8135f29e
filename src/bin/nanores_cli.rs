//! NanoRes CLI
//!
//! Generates `.nres` embedded resource files for C and C++ programs.
//! Exits non-zero on bad paths or a batch-level failure; per-file failures
//! are reported in the summary counts and never fail the run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use nanores_core::{
    batch::{check_path, BatchRunner, RunMode},
    pipeline::ResourceEncoder,
    templates::EncoderConfig,
    DEFAULT_OUT_EXT,
};

#[derive(Parser)]
#[command(name = "nanores-cli")]
#[command(version)]
#[command(about = "Generates embedded resource files for C and C++ programs")]
struct Cli {
    /// The path of the file or directory to process
    path: PathBuf,

    /// Treat the path as a directory and process it recursively
    #[arg(short, long)]
    dir: bool,

    /// Purge the directory of all generated resource files and the manifest
    #[arg(short, long)]
    purge: bool,

    /// Extension for generated artifacts
    #[arg(long, default_value = DEFAULT_OUT_EXT)]
    ext: String,

    /// Emit the batch report as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = EncoderConfig::new();
    config.out_ext = cli.ext.clone();
    let runner = BatchRunner::new(ResourceEncoder::new(config)).quiet(cli.json);

    let mode = if cli.dir || cli.purge {
        RunMode::Directory
    } else {
        RunMode::SingleFile
    };
    if let Err(e) = check_path(&cli.path, mode) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cli.purge {
        if !cli.json {
            println!(
                "Purging directory '{}' of all .{} files...",
                cli.path.display(),
                cli.ext
            );
        }
        return match runner.purge(&cli.path) {
            Ok(count) => {
                println!(
                    "Cleaned up {} resource file{}.",
                    count,
                    if count == 1 { "" } else { "s" }
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match runner.run(&cli.path, mode) {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report).unwrap());
            } else {
                println!(
                    "Finished processing the {} pointed to by '{}'. Run statistics are as follows:",
                    if cli.dir { "directory" } else { "file" },
                    cli.path.display()
                );
                println!("\tSuccessful: {}", report.succeeded);
                println!("\tFailed: {}", report.failed);
                println!("\tTotal: {}", report.attempted);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
