//! Runs one population pass and prints the resulting catalog as JSON.
//!
//! The locally built archive is found through the artifact repository (or an
//! explicit `--archive`), merged under the supersession rule, and every
//! vacant level is then filled from the default releases. Any failure aborts
//! with exit status 1 and leaves stdout empty.

use anyhow::{Context, Result};
use clap::Parser;
use platform_catalog::{
    Catalog, CatalogConfig, EntrySummary, LocalBuildProvider, LocalRepositoryResolver,
    default_catalog, error_report, init_logging, parse_major,
};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    name = "populate-catalog",
    about = "Register the locally built platform archive and list the runtime catalog"
)]
struct Cli {
    /// Local artifact repository root (defaults to PLATFORM_CATALOG_REPO, then ~/.m2/repository)
    #[arg(long)]
    repository: Option<PathBuf>,

    /// Explicit archive path instead of the repository's "current" artifact
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Host toolchain version string (defaults to PLATFORM_TOOLCHAIN_VERSION, then `java`)
    #[arg(long)]
    toolchain_version: Option<String>,

    /// Start from the full default catalog instead of an empty one
    #[arg(long)]
    seed_defaults: bool,

    /// Only list entries the host toolchain can run
    #[arg(long)]
    supported_only: bool,

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

    let config = CatalogConfig::from_env_with(
        cli.repository.clone(),
        cli.archive.clone(),
        cli.toolchain_version.clone(),
    )?;
    // Only consulted without an archive, in which case a repository is set.
    let resolver = LocalRepositoryResolver::new(config.repository.clone().unwrap_or_default());
    let provider = LocalBuildProvider::new(resolver, config.toolchain_version.clone())
        .with_archive_override(config.archive.clone());

    let mut catalog = if cli.seed_defaults {
        default_catalog()
    } else {
        Catalog::new()
    };
    provider
        .populate(&mut catalog)
        .context("Could not populate the runtime catalog from the local build")?;

    let summaries: Vec<EntrySummary> = if cli.supported_only {
        let host = parse_major(config.toolchain_version.as_deref())?;
        for entry in catalog.entries().filter(|entry| !entry.is_supported_on(host)) {
            warn!("{}", entry.unsupported_message(host));
        }
        catalog.supported(host).map(|entry| entry.summary()).collect()
    } else {
        catalog.summaries()
    };

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
