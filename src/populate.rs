//! The population pass for a locally built platform archive.
//!
//! Order matters: every fallible step (toolchain version, archive location,
//! archive read) runs before the catalog is touched, so a failed pass leaves
//! the caller's catalog exactly as it was.

use crate::archive::ZipArchiveHandle;
use crate::catalog::{ApiLevel, Catalog, RuntimeEntry, fill_defaults, merge_local_build};
use crate::error::CatalogError;
use crate::release::{ReleaseDescriptor, read_release};
use crate::resolver::ArtifactResolver;
use crate::runtime::parse_major;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Level of the conventional "current" sentinel the local build is published as.
pub const LOCAL_BUILD_API_LEVEL: ApiLevel = ApiLevel(10000);
pub const LOCAL_BUILD_RELEASE: &str = "current";
pub const LOCAL_BUILD_TAG: &str = "r0";
pub const LOCAL_BUILD_CODE_NAME: &str = "UpsideDownCake";

/// Find the locally built archive.
///
/// An explicit override must name an existing file. Otherwise the archive is
/// wherever the repository keeps the "current" sentinel artifact.
pub fn locate_local_archive(
    resolver: &dyn ArtifactResolver,
    archive_override: Option<&Path>,
    toolchain_major: u32,
) -> Result<PathBuf, CatalogError> {
    if let Some(path) = archive_override {
        return match path.metadata() {
            Ok(meta) if meta.is_file() => Ok(path.to_path_buf()),
            Ok(_) => Err(CatalogError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            )),
            Err(err) => Err(CatalogError::io(path, err)),
        };
    }

    let sentinel = RuntimeEntry::from_repository(
        LOCAL_BUILD_API_LEVEL,
        LOCAL_BUILD_RELEASE,
        LOCAL_BUILD_TAG,
        LOCAL_BUILD_CODE_NAME,
        toolchain_major,
    );
    sentinel.archive_location(resolver).map(Path::to_path_buf)
}

/// Populates a catalog from one locally built archive plus the defaults.
pub struct LocalBuildProvider<R> {
    resolver: R,
    archive_override: Option<PathBuf>,
    toolchain_version: Option<String>,
}

impl<R: ArtifactResolver> LocalBuildProvider<R> {
    pub fn new(resolver: R, toolchain_version: Option<String>) -> Self {
        Self {
            resolver,
            archive_override: None,
            toolchain_version,
        }
    }

    pub fn with_archive_override(mut self, archive: Option<PathBuf>) -> Self {
        self.archive_override = archive;
        self
    }

    /// Detect the local build without touching any catalog.
    pub fn detect(&self) -> Result<RuntimeEntry, CatalogError> {
        let toolchain = parse_major(self.toolchain_version.as_deref())?;
        let location =
            locate_local_archive(&self.resolver, self.archive_override.as_deref(), toolchain)?;
        debug!(archive = %location.display(), toolchain, "located local archive");

        let descriptor = read_archive_release(&location)?;
        Ok(RuntimeEntry::provided(
            descriptor.api_level,
            LOCAL_BUILD_RELEASE,
            descriptor.short_code,
            toolchain,
            location,
        ))
    }

    /// Run the full pass: detect, merge under the supersession rule, then fill
    /// every vacant level with its default.
    ///
    /// On error the catalog is left unmodified.
    pub fn populate(&self, catalog: &mut Catalog) -> Result<ApiLevel, CatalogError> {
        let entry = self.detect()?;
        let level = entry.api_level();
        let evicted = merge_local_build(catalog, entry);
        let added = fill_defaults(catalog);
        info!(
            api_level = %level,
            evicted = evicted.len(),
            defaults = added,
            total = catalog.len(),
            "catalog populated"
        );
        Ok(level)
    }
}

/// Open `path`, read its descriptor, and release the archive before returning.
pub fn read_archive_release(path: &Path) -> Result<ReleaseDescriptor, CatalogError> {
    let mut archive = ZipArchiveHandle::open(path)?;
    read_release(&mut archive)?.ok_or_else(|| CatalogError::MetadataNotFound {
        path: path.to_path_buf(),
    })
}
