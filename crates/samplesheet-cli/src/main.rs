//! Samplesheet validation CLI.
//!
//! Thin shell around [`samplesheet::check_samplesheet`]: argument parsing,
//! logging setup, input-existence check, output-directory creation, and exit
//! codes. Exit 0 on success, 1 on a validation error, 2 when the input file
//! does not exist.

mod cli;

use std::fs;
use std::process;

use clap::Parser;
use tracing::{debug, error};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.level_filter())
        .with_target(false)
        .without_time()
        .init();

    if !cli.file_in.is_file() {
        error!("The given input file {} was not found!", cli.file_in.display());
        process::exit(2);
    }

    if let Some(parent) = cli.file_out.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Could not create output directory {}: {e}", parent.display());
                process::exit(1);
            }
        }
    }

    debug!(
        "Validating {} into {}",
        cli.file_in.display(),
        cli.file_out.display()
    );
    if let Err(e) = samplesheet::check_samplesheet(&cli.file_in, &cli.file_out) {
        error!("{e}");
        process::exit(1);
    }
}
