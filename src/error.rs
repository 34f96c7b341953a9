//! Error taxonomy for a population pass.
//!
//! Every variant is fatal at this layer: there is exactly one local archive
//! and one host environment, so nothing here is retried. Each variant carries
//! the path or input that was being examined so an operator can tell which
//! part of the build environment is misconfigured.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The archive (or a repository artifact) is missing, unreadable, or not
    /// a zip container.
    #[error("could not read platform archive at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive opened but carries no usable release descriptor.
    #[error(
        "could not read the version of the platform archive at {}; \
         no build.prop with ro.build.version.sdk was found, so the active runtime is unknown",
        .path.display()
    )]
    MetadataNotFound { path: PathBuf },

    /// The host toolchain version string is absent or not an integer.
    #[error("could not determine host toolchain version: {}", ParseInput(.input.as_deref()))]
    Parse {
        input: Option<String>,
        #[source]
        source: Option<ParseIntError>,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable class name; `error_report` tags CLI diagnostics
    /// with it.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Io { .. } => "io",
            CatalogError::MetadataNotFound { .. } => "metadata_not_found",
            CatalogError::Parse { .. } => "parse",
        }
    }
}

struct ParseInput<'a>(Option<&'a str>);

impl fmt::Display for ParseInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some("") => f.write_str("no version string found"),
            Some(value) => write!(f, "unparseable version string '{value}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_names_missing_input() {
        let err = CatalogError::Parse {
            input: None,
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "could not determine host toolchain version: no version string found"
        );
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn io_message_carries_path() {
        let err = CatalogError::io(
            "/tmp/missing.jar",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("/tmp/missing.jar"));
        assert_eq!(err.kind(), "io");
    }
}
