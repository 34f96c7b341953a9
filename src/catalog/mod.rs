//! Runtime catalog wiring.
//!
//! `Catalog` is the version-keyed collection of runtime entries. The merge
//! step installs a locally built runtime under the supersession rule, and the
//! defaults module fills the remaining gaps with well-known releases.

pub mod defaults;
pub mod identity;
pub mod merge;
pub mod model;
pub mod registry;

pub use defaults::{
    KNOWN_RELEASES, KnownRelease, default_catalog, default_entries, fill_defaults,
    known_release, known_release_by_code_name,
};
pub use identity::{ApiLevel, ArtifactCoordinates};
pub use merge::merge_local_build;
pub use model::{ArtifactSource, EntrySummary, RuntimeEntry};
pub use registry::Catalog;
