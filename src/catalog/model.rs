//! Runtime entries: one registrable platform runtime each.
//!
//! An entry is either backed by a provided archive path (the locally built
//! jar) or by repository coordinates that are resolved the first time the
//! archive location is requested. The resolved path is cached in a `OnceCell`
//! so readers can share an entry once population has finished.

use crate::catalog::identity::{ApiLevel, ArtifactCoordinates};
use crate::error::CatalogError;
use crate::resolver::ArtifactResolver;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const ARTIFACT_GROUP: &str = "org.robolectric";
pub const ARTIFACT_ID: &str = "android-all-instrumented";
/// Instrumentation revision baked into every repository artifact version.
pub const PREINSTRUMENTED_VERSION: u32 = 6;

/// Where the archive backing an entry comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArtifactSource {
    Provided(PathBuf),
    Repository(ArtifactCoordinates),
}

#[derive(Clone, Debug)]
pub struct RuntimeEntry {
    api_level: ApiLevel,
    release_label: String,
    build_tag: String,
    code_name: String,
    toolchain_version: u32,
    source: ArtifactSource,
    resolved: OnceCell<PathBuf>,
}

impl RuntimeEntry {
    /// Entry whose archive lives in the artifact repository.
    ///
    /// The coordinates follow the instrumented-jar naming convention:
    /// `<release>-robolectric-<build_tag>-i<revision>`.
    pub fn from_repository(
        api_level: ApiLevel,
        release_label: impl Into<String>,
        build_tag: impl Into<String>,
        code_name: impl Into<String>,
        toolchain_version: u32,
    ) -> Self {
        let release_label = release_label.into();
        let build_tag = build_tag.into();
        let coordinates = ArtifactCoordinates::new(
            ARTIFACT_GROUP,
            ARTIFACT_ID,
            format!("{release_label}-robolectric-{build_tag}-i{PREINSTRUMENTED_VERSION}"),
        );
        Self {
            api_level,
            release_label,
            build_tag,
            code_name: code_name.into(),
            toolchain_version,
            source: ArtifactSource::Repository(coordinates),
            resolved: OnceCell::new(),
        }
    }

    /// Entry backed by an archive already found on disk.
    pub fn provided(
        api_level: ApiLevel,
        release_label: impl Into<String>,
        code_name: impl Into<String>,
        toolchain_version: u32,
        archive: impl Into<PathBuf>,
    ) -> Self {
        let archive = archive.into();
        Self {
            api_level,
            release_label: release_label.into(),
            build_tag: String::new(),
            code_name: code_name.into(),
            toolchain_version,
            resolved: OnceCell::with_value(archive.clone()),
            source: ArtifactSource::Provided(archive),
        }
    }

    pub fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    pub fn release_label(&self) -> &str {
        &self.release_label
    }

    pub fn build_tag(&self) -> &str {
        &self.build_tag
    }

    pub fn code_name(&self) -> &str {
        &self.code_name
    }

    pub fn toolchain_version(&self) -> u32 {
        self.toolchain_version
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    /// Archive path, resolving repository coordinates on first use.
    ///
    /// A failed resolution is not cached; the next call tries again.
    pub fn archive_location(
        &self,
        resolver: &dyn ArtifactResolver,
    ) -> Result<&Path, CatalogError> {
        self.resolved
            .get_or_try_init(|| match &self.source {
                ArtifactSource::Provided(path) => Ok(path.clone()),
                ArtifactSource::Repository(coordinates) => resolver.resolve(coordinates),
            })
            .map(PathBuf::as_path)
    }

    /// The cached archive path, if it has been resolved.
    pub fn resolved_location(&self) -> Option<&Path> {
        self.resolved.get().map(PathBuf::as_path)
    }

    /// Whether a host toolchain of major version `host_major` can run this entry.
    pub fn is_supported_on(&self, host_major: u32) -> bool {
        host_major >= self.toolchain_version
    }

    pub fn unsupported_message(&self, host_major: u32) -> String {
        format!(
            "API level {} ({}) requires toolchain {} or newer; host reports {}",
            self.api_level, self.release_label, self.toolchain_version, host_major
        )
    }

    pub fn summary(&self) -> EntrySummary {
        let (archive, coordinates) = match &self.source {
            ArtifactSource::Provided(path) => (Some(path.display().to_string()), None),
            ArtifactSource::Repository(coords) => (
                self.resolved_location().map(|p| p.display().to_string()),
                Some(coords.to_string()),
            ),
        };
        EntrySummary {
            api_level: self.api_level,
            release_label: self.release_label.clone(),
            build_tag: self.build_tag.clone(),
            code_name: self.code_name.clone(),
            toolchain_version: self.toolchain_version,
            archive,
            coordinates,
        }
    }
}

impl PartialEq for RuntimeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.api_level == other.api_level
            && self.release_label == other.release_label
            && self.build_tag == other.build_tag
            && self.code_name == other.code_name
            && self.toolchain_version == other.toolchain_version
            && self.source == other.source
    }
}

impl Eq for RuntimeEntry {}

#[derive(Clone, Debug, Serialize)]
/// Serializable view of an entry for CLI output.
pub struct EntrySummary {
    pub api_level: ApiLevel,
    pub release_label: String,
    pub build_tag: String,
    pub code_name: String,
    pub toolchain_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingResolver {
        calls: Cell<usize>,
        answer: PathBuf,
    }

    impl ArtifactResolver for CountingResolver {
        fn resolve(&self, _coordinates: &ArtifactCoordinates) -> Result<PathBuf, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.clone())
        }
    }

    #[test]
    fn repository_location_resolves_once() {
        let entry = RuntimeEntry::from_repository(ApiLevel(34), "14", "10818077", "REL", 17);
        let resolver = CountingResolver {
            calls: Cell::new(0),
            answer: PathBuf::from("/repo/u.jar"),
        };
        assert!(entry.resolved_location().is_none());
        assert_eq!(
            entry.archive_location(&resolver).unwrap(),
            Path::new("/repo/u.jar")
        );
        assert_eq!(
            entry.archive_location(&resolver).unwrap(),
            Path::new("/repo/u.jar")
        );
        assert_eq!(resolver.calls.get(), 1);
    }

    #[test]
    fn provided_location_never_touches_resolver() {
        let entry = RuntimeEntry::provided(ApiLevel(35), "current", "V", 17, "/build/all.jar");
        let resolver = CountingResolver {
            calls: Cell::new(0),
            answer: PathBuf::from("/elsewhere.jar"),
        };
        assert_eq!(
            entry.archive_location(&resolver).unwrap(),
            Path::new("/build/all.jar")
        );
        assert_eq!(resolver.calls.get(), 0);
        assert_eq!(entry.build_tag(), "");
    }

    #[test]
    fn coordinates_use_instrumented_naming() {
        let entry = RuntimeEntry::from_repository(ApiLevel(33), "13", "9030017", "Tiramisu", 9);
        match entry.source() {
            ArtifactSource::Repository(coords) => assert_eq!(
                coords.to_string(),
                "org.robolectric:android-all-instrumented:13-robolectric-9030017-i6"
            ),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn support_depends_on_host_major() {
        let entry = RuntimeEntry::from_repository(ApiLevel(34), "14", "10818077", "REL", 17);
        assert!(entry.is_supported_on(17));
        assert!(entry.is_supported_on(21));
        assert!(!entry.is_supported_on(11));
        assert!(entry.unsupported_message(11).contains("requires toolchain 17"));
    }

    #[test]
    fn equality_ignores_resolution_cache() {
        let a = RuntimeEntry::from_repository(ApiLevel(30), "11", "6757853", "REL", 9);
        let b = a.clone();
        let resolver = CountingResolver {
            calls: Cell::new(0),
            answer: PathBuf::from("/repo/r.jar"),
        };
        a.archive_location(&resolver).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn entries_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuntimeEntry>();
    }
}
