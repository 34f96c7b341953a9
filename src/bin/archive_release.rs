//! Prints the release descriptor embedded in a platform archive.

use anyhow::Result;
use clap::Parser;
use platform_catalog::{error_report, init_logging, read_archive_release};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "archive-release",
    about = "Read the release metadata embedded in a platform archive"
)]
struct Cli {
    /// Path to the platform archive (jar)
    archive: PathBuf,

    /// Log level for stderr output (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", error_report(&err));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let descriptor = read_archive_release(&cli.archive)?;
    println!("{}", serde_json::to_string(&descriptor)?);
    Ok(())
}
