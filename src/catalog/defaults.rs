//! Well-known platform releases and the gap-filling population step.

use crate::catalog::identity::ApiLevel;
use crate::catalog::model::RuntimeEntry;
use crate::catalog::registry::Catalog;
use tracing::debug;

/// One finalized platform release.
#[derive(Clone, Copy, Debug)]
pub struct KnownRelease {
    pub api_level: u32,
    pub release: &'static str,
    pub build_tag: &'static str,
    pub short_code: &'static str,
    pub code_name: &'static str,
    /// Minimum toolchain major version the instrumented jar needs.
    pub min_toolchain: u32,
}

pub const KNOWN_RELEASES: &[KnownRelease] = &[
    release(16, "4.1.2_r1", "r1", "J", "JellyBean", 8),
    release(17, "4.2.2_r1.2", "r1", "J", "JellyBeanMR1", 8),
    release(18, "4.3_r2", "r1", "J", "JellyBeanMR2", 8),
    release(19, "4.4_r1", "r2", "K", "KitKat", 8),
    release(21, "5.0.2_r3", "r0", "L", "Lollipop", 8),
    release(22, "5.1.1_r9", "r2", "L", "LollipopMR1", 8),
    release(23, "6.0.1_r3", "r1", "M", "Marshmallow", 8),
    release(24, "7.0.0_r1", "r1", "N", "Nougat", 8),
    release(25, "7.1.0_r7", "r1", "N", "NougatMR1", 8),
    release(26, "8.0.0_r4", "r1", "O", "Oreo", 8),
    release(27, "8.1.0", "4611349", "O", "OreoMR1", 8),
    release(28, "9", "4913185-2", "P", "Pie", 8),
    release(29, "10", "5803371", "Q", "Q", 9),
    release(30, "11", "6757853", "R", "R", 9),
    release(31, "12", "7732740", "S", "S", 9),
    release(32, "12.1", "8229987", "Sv2", "Sv2", 9),
    release(33, "13", "9030017", "T", "Tiramisu", 9),
    release(34, "14", "10818077", "U", "UpsideDownCake", 17),
    release(35, "15", "12650502", "V", "VanillaIceCream", 17),
];

const fn release(
    api_level: u32,
    release: &'static str,
    build_tag: &'static str,
    short_code: &'static str,
    code_name: &'static str,
    min_toolchain: u32,
) -> KnownRelease {
    KnownRelease {
        api_level,
        release,
        build_tag,
        short_code,
        code_name,
        min_toolchain,
    }
}

impl KnownRelease {
    pub fn entry(&self) -> RuntimeEntry {
        RuntimeEntry::from_repository(
            ApiLevel(self.api_level),
            self.release,
            self.build_tag,
            self.code_name,
            self.min_toolchain,
        )
    }
}

pub fn known_release(level: ApiLevel) -> Option<&'static KnownRelease> {
    KNOWN_RELEASES.iter().find(|r| r.api_level == level.get())
}

/// Match an in-development codename against finalized releases, ignoring case.
pub fn known_release_by_code_name(code_name: &str) -> Option<&'static KnownRelease> {
    KNOWN_RELEASES
        .iter()
        .find(|r| r.code_name.eq_ignore_ascii_case(code_name))
}

/// Repository-backed entries for every known release, ascending.
pub fn default_entries() -> impl Iterator<Item = RuntimeEntry> {
    KNOWN_RELEASES.iter().map(KnownRelease::entry)
}

/// A catalog holding every default entry.
pub fn default_catalog() -> Catalog {
    default_entries().collect()
}

/// Fill every vacant level with its default, never overwriting an existing
/// entry. Returns the number of defaults inserted.
pub fn fill_defaults(catalog: &mut Catalog) -> usize {
    let mut added = 0;
    for entry in default_entries() {
        let level = entry.api_level();
        if catalog.insert_if_absent(entry) {
            debug!(api_level = %level, "added default runtime");
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_ascending() {
        assert!(
            KNOWN_RELEASES
                .windows(2)
                .all(|pair| pair[0].api_level < pair[1].api_level)
        );
    }

    #[test]
    fn fill_defaults_keeps_existing_entries() {
        let mut catalog = Catalog::new();
        let local = RuntimeEntry::provided(ApiLevel(30), "current", "R", 17, "/out/all.jar");
        catalog.insert_if_absent(local.clone());

        let added = fill_defaults(&mut catalog);

        assert_eq!(catalog.get(ApiLevel(30)), Some(&local));
        assert_eq!(added, KNOWN_RELEASES.len() - 1);
        assert_eq!(catalog.len(), KNOWN_RELEASES.len());
        assert_eq!(catalog.max_level(), Some(ApiLevel(35)));
        assert_eq!(
            catalog.get(ApiLevel(31)),
            known_release(ApiLevel(31)).map(KnownRelease::entry).as_ref()
        );
    }

    #[test]
    fn fill_defaults_fills_every_gap_once() {
        let mut catalog = Catalog::new();
        assert_eq!(fill_defaults(&mut catalog), KNOWN_RELEASES.len());
        assert_eq!(fill_defaults(&mut catalog), 0);
    }

    #[test]
    fn code_name_lookup_ignores_case() {
        let found = known_release_by_code_name("upsidedowncake").unwrap();
        assert_eq!(found.api_level, 34);
        assert!(known_release_by_code_name("Baklava").is_none());
        assert_eq!(known_release(ApiLevel(33)).unwrap().short_code, "T");
    }
}
