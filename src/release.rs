//! Release metadata embedded in a platform archive.
//!
//! The archive carries a `build.prop` at its root. Its version properties say
//! which API level the archive implements and whether it is a finalized
//! release or an in-development build reporting the previous level.

use crate::archive::ArchiveHandle;
use crate::catalog::{ApiLevel, known_release, known_release_by_code_name};
use crate::error::CatalogError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const BUILD_PROP_ENTRY: &str = "build.prop";
const SDK_PROPERTY: &str = "ro.build.version.sdk";
const CODENAME_PROPERTY: &str = "ro.build.version.codename";
const RELEASE_PROPERTY: &str = "ro.build.version.release";
const RELEASED_CODENAME: &str = "REL";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// What an archive says about the platform version it implements.
pub struct ReleaseDescriptor {
    pub api_level: ApiLevel,
    /// Short release code (`U`, `14`, ...), used as the entry's code name.
    pub short_code: String,
    pub code_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// Finalized release (`REL` codename) rather than an in-development build.
    pub released: bool,
}

/// Read the release descriptor embedded in `archive`.
///
/// `Ok(None)` means the archive was readable but carries no usable metadata;
/// callers must treat that as fatal rather than registering an unversioned
/// entry. Errors are reserved for archive reads that fail outright.
pub fn read_release(
    archive: &mut dyn ArchiveHandle,
) -> Result<Option<ReleaseDescriptor>, CatalogError> {
    let Some(bytes) = archive.read_entry(BUILD_PROP_ENTRY)? else {
        warn!(
            archive = %archive.path().display(),
            entries = archive.entry_names().len(),
            "archive has no {BUILD_PROP_ENTRY}"
        );
        return Ok(None);
    };
    let text = String::from_utf8_lossy(&bytes);
    let props = parse_properties(&text);
    let descriptor = descriptor_from_properties(&props);
    match &descriptor {
        Some(found) => debug!(
            archive = %archive.path().display(),
            api_level = %found.api_level,
            short_code = %found.short_code,
            "read release descriptor"
        ),
        None => warn!(
            archive = %archive.path().display(),
            "{BUILD_PROP_ENTRY} lacks a numeric {SDK_PROPERTY}"
        ),
    }
    Ok(descriptor)
}

/// Parse properties-file text into key/value pairs.
///
/// Accepts `key=value`, `key: value` and `key value`; skips blank lines and
/// `#`/`!` comments. Later duplicates win.
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let split = line
            .char_indices()
            .find(|(_, c)| matches!(c, '=' | ':'))
            .or_else(|| line.char_indices().find(|(_, c)| c.is_whitespace()));
        let (key, value) = match split {
            Some((idx, sep)) => (&line[..idx], &line[idx + sep.len_utf8()..]),
            None => (line, ""),
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        props.insert(key.to_string(), value.trim().to_string());
    }
    props
}

/// Turn build properties into a descriptor, or `None` without a numeric SDK.
pub fn descriptor_from_properties(props: &BTreeMap<String, String>) -> Option<ReleaseDescriptor> {
    let sdk: u32 = props.get(SDK_PROPERTY)?.parse().ok()?;
    let code_name = props
        .get(CODENAME_PROPERTY)
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| RELEASED_CODENAME.to_string());
    let release = props
        .get(RELEASE_PROPERTY)
        .filter(|value| !value.is_empty())
        .cloned();

    let released = code_name == RELEASED_CODENAME;
    let (api_level, short_code) = if released {
        let level = ApiLevel(sdk);
        let short_code = known_release(level)
            .map(|known| known.short_code.to_string())
            .or_else(|| release.clone())
            .unwrap_or_else(|| sdk.to_string());
        (level, short_code)
    } else if let Some(known) = known_release_by_code_name(&code_name) {
        (ApiLevel(known.api_level), known.short_code.to_string())
    } else {
        // In-development builds still report the last finalized level.
        let short_code = code_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_default();
        (ApiLevel(sdk.saturating_add(1)), short_code)
    };

    Some(ReleaseDescriptor {
        api_level,
        short_code,
        code_name,
        release,
        released,
    })
}
