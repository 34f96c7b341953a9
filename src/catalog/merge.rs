//! Supersession rule for a locally built runtime.
//!
//! A locally built archive is the authoritative build for its own API level
//! and for every level the catalog had assumed was newer. Merging it evicts
//! all entries at or above its level and installs it in their place; entries
//! strictly below are left alone.

use crate::catalog::model::RuntimeEntry;
use crate::catalog::registry::Catalog;
use tracing::{info, warn};

/// Merge `entry` into `catalog` in place and return the evicted entries in
/// ascending level order.
///
/// Afterwards the catalog holds exactly one entry at `entry`'s level (the new
/// one) and nothing above it. An entry already at the same level is evicted
/// and replaced, so the last detected build wins. Merging the same entry
/// twice leaves the catalog as merging it once did.
pub fn merge_local_build(catalog: &mut Catalog, entry: RuntimeEntry) -> Vec<RuntimeEntry> {
    let level = entry.api_level();
    let entries = catalog.entries_mut();

    let evicted: Vec<RuntimeEntry> = entries.split_off(&level).into_values().collect();
    for old in &evicted {
        warn!(
            evicted = %old.api_level(),
            release = old.release_label(),
            superseded_by = %level,
            "local build supersedes registered runtime"
        );
    }

    info!(
        api_level = %level,
        release = entry.release_label(),
        code_name = entry.code_name(),
        "registered local runtime"
    );
    entries.insert(level, entry);
    evicted
}
