//! Environment-driven configuration for a population pass.
//!
//! Binaries hand their command-line values to `CatalogConfig::from_env_with`;
//! anything left unset falls back to the environment.

use crate::runtime::{env_non_empty, host_toolchain_version};
use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};

pub const REPOSITORY_ENV: &str = "PLATFORM_CATALOG_REPO";
pub const ARCHIVE_ENV: &str = "PLATFORM_CATALOG_ARCHIVE";

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Root of the local Maven-layout artifact repository. `None` only when
    /// `archive` is set and no repository could be found.
    pub repository: Option<PathBuf>,
    /// Explicit archive path; skips coordinate resolution when set.
    pub archive: Option<PathBuf>,
    /// Raw host toolchain version string, parsed during the pass.
    pub toolchain_version: Option<String>,
}

impl CatalogConfig {
    /// Environment configuration where explicit values skip discovery: a given
    /// repository is used as-is and a given toolchain version never probes
    /// the host. A repository is only required when no archive is known.
    pub fn from_env_with(
        repository: Option<PathBuf>,
        archive: Option<PathBuf>,
        toolchain_version: Option<String>,
    ) -> Result<Self> {
        let archive = archive.or_else(|| env_non_empty(ARCHIVE_ENV).map(PathBuf::from));
        let repository = match (repository, &archive) {
            (Some(root), _) => Some(root),
            (None, Some(_)) => find_repository_root().ok(),
            (None, None) => Some(find_repository_root()?),
        };
        Ok(Self {
            repository,
            archive,
            toolchain_version: toolchain_version.or_else(host_toolchain_version),
        })
    }
}

fn repository_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.trim().is_empty() {
        return None;
    }
    let path = PathBuf::from(hint);
    path.is_dir().then_some(path)
}

fn default_user_repository() -> Option<PathBuf> {
    let home = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE"))?;
    let candidate = Path::new(&home).join(".m2").join("repository");
    candidate.is_dir().then_some(candidate)
}

/// Locate the local artifact repository.
///
/// Search order: `PLATFORM_CATALOG_REPO` when it names a directory, the
/// build-time `PLATFORM_CATALOG_REPO_HINT`, then `~/.m2/repository`.
pub fn find_repository_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(REPOSITORY_ENV) {
        if let Some(root) = repository_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("PLATFORM_CATALOG_REPO_HINT") {
        if let Some(root) = repository_from_hint(hint) {
            return Ok(root);
        }
    }

    if let Some(root) = default_user_repository() {
        return Ok(root);
    }

    bail!(
        "Unable to locate a local artifact repository. \
         Set {REPOSITORY_ENV} to the directory holding the platform jars."
    );
}
