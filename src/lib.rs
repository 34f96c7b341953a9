//! Shared library for the platform-catalog tools.
//!
//! The crate locates a locally built platform archive, reads the release
//! metadata embedded in it, and registers it into a version-keyed catalog of
//! runtimes. A local build supersedes every registered runtime at or above
//! its own API level; well-known releases then fill every vacant level.
//!
//! The binaries depend on the public functions here: configuration
//! discovery, the population pass, and the archive release reader.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod error;
pub mod populate;
pub mod release;
pub mod resolver;
pub mod runtime;

pub use archive::{ArchiveHandle, ZipArchiveHandle};
pub use catalog::{
    ApiLevel, ArtifactCoordinates, ArtifactSource, Catalog, EntrySummary, KNOWN_RELEASES,
    KnownRelease, RuntimeEntry, default_catalog, fill_defaults, merge_local_build,
};
pub use config::{CatalogConfig, find_repository_root};
pub use error::CatalogError;
pub use populate::{LocalBuildProvider, locate_local_archive, read_archive_release};
pub use release::{ReleaseDescriptor, read_release};
pub use resolver::{ArtifactResolver, LocalRepositoryResolver};
pub use runtime::{host_toolchain_version, parse_major};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber used by the binaries.
///
/// `RUST_LOG` wins when set; otherwise `level` is the global filter. Logs
/// never go to stdout, which the tools reserve for JSON.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Render a failed run for stderr. Library errors anywhere in the chain are
/// tagged with their class, as in `error[parse]: ...`.
pub fn error_report(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CatalogError>() {
        Some(catalog) => format!("error[{}]: {err:#}", catalog.kind()),
        None => format!("{err:#}"),
    }
}
