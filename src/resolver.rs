//! Maps artifact coordinates onto files in a local repository.
//!
//! Resolution never downloads anything: a coordinate either names a jar that
//! already sits in the local repository or resolution fails with the path
//! that was tried.

use crate::catalog::ArtifactCoordinates;
use crate::error::CatalogError;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Turns coordinates into a readable local path.
pub trait ArtifactResolver {
    fn resolve(&self, coordinates: &ArtifactCoordinates) -> Result<PathBuf, CatalogError>;
}

impl<R: ArtifactResolver + ?Sized> ArtifactResolver for &R {
    fn resolve(&self, coordinates: &ArtifactCoordinates) -> Result<PathBuf, CatalogError> {
        (**self).resolve(coordinates)
    }
}

/// Resolver over a Maven-layout directory such as `~/.m2/repository`.
#[derive(Clone, Debug)]
pub struct LocalRepositoryResolver {
    root: PathBuf,
}

impl LocalRepositoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactResolver for LocalRepositoryResolver {
    fn resolve(&self, coordinates: &ArtifactCoordinates) -> Result<PathBuf, CatalogError> {
        let candidate = self.root.join(coordinates.layout_path());
        debug!(%coordinates, path = %candidate.display(), "resolving artifact");
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(CatalogError::io(
                candidate,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("artifact {coordinates} is not present in the local repository"),
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolves_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let coords = ArtifactCoordinates::new("org.example", "runtime", "1.0");
        let path = dir.path().join(coords.layout_path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"jar").unwrap();

        let resolver = LocalRepositoryResolver::new(dir.path());
        assert_eq!(resolver.resolve(&coords).unwrap(), path);
    }

    #[test]
    fn missing_artifact_reports_attempted_path() {
        let dir = TempDir::new().unwrap();
        let coords = ArtifactCoordinates::new("org.example", "runtime", "2.0");
        let resolver = LocalRepositoryResolver::new(dir.path());
        match resolver.resolve(&coords).unwrap_err() {
            CatalogError::Io { path, source } => {
                assert_eq!(path, dir.path().join(coords.layout_path()));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
