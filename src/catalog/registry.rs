//! Ordered, version-keyed collection of runtime entries.
//!
//! The catalog is owned by whoever runs the population pass and is only
//! mutated during that pass (by the merge step and the default filler); after
//! that callers treat it as read-only.

use crate::catalog::identity::ApiLevel;
use crate::catalog::model::{EntrySummary, RuntimeEntry};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Runtime entries keyed by API level, ascending.
pub struct Catalog {
    entries: BTreeMap<ApiLevel, RuntimeEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: ApiLevel) -> Option<&RuntimeEntry> {
        self.entries.get(&level)
    }

    /// Iterates API levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = ApiLevel> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RuntimeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_level(&self) -> Option<ApiLevel> {
        self.entries.keys().next_back().copied()
    }

    /// Entries a host toolchain of major version `host_major` can run.
    pub fn supported(&self, host_major: u32) -> impl Iterator<Item = &RuntimeEntry> {
        self.entries
            .values()
            .filter(move |entry| entry.is_supported_on(host_major))
    }

    /// Insert `entry` only when its level is vacant. Returns whether it landed.
    pub fn insert_if_absent(&mut self, entry: RuntimeEntry) -> bool {
        match self.entries.entry(entry.api_level()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn summaries(&self) -> Vec<EntrySummary> {
        self.entries.values().map(RuntimeEntry::summary).collect()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut BTreeMap<ApiLevel, RuntimeEntry> {
        &mut self.entries
    }
}

impl FromIterator<RuntimeEntry> for Catalog {
    /// Later entries win when two share a level.
    fn from_iter<I: IntoIterator<Item = RuntimeEntry>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|entry| (entry.api_level(), entry))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u32, toolchain: u32) -> RuntimeEntry {
        RuntimeEntry::from_repository(ApiLevel(level), level.to_string(), "r1", "REL", toolchain)
    }

    #[test]
    fn levels_iterate_ascending() {
        let catalog: Catalog = [entry(30, 9), entry(28, 8), entry(29, 9)]
            .into_iter()
            .collect();
        let levels: Vec<u32> = catalog.levels().map(ApiLevel::get).collect();
        assert_eq!(levels, vec![28, 29, 30]);
        assert_eq!(catalog.max_level(), Some(ApiLevel(30)));
    }

    #[test]
    fn insert_if_absent_keeps_existing() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert_if_absent(entry(33, 9)));
        let replacement = RuntimeEntry::provided(ApiLevel(33), "current", "T", 17, "/x.jar");
        assert!(!catalog.insert_if_absent(replacement));
        assert_eq!(catalog.get(ApiLevel(33)).unwrap().build_tag(), "r1");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn supported_filters_by_toolchain() {
        let catalog: Catalog = [entry(28, 8), entry(29, 9), entry(34, 17)]
            .into_iter()
            .collect();
        let levels: Vec<u32> = catalog.supported(11).map(|e| e.api_level().get()).collect();
        assert_eq!(levels, vec![28, 29]);
    }
}
