//! Host toolchain detection shared by the population pass and the binaries.
//!
//! Entries are stamped with the major version of the toolchain that built or
//! will run them. The version string comes from `PLATFORM_TOOLCHAIN_VERSION`
//! when set, otherwise from the `java.version` property the host `java`
//! reports.

use crate::error::CatalogError;
use std::env;
use std::process::Command;
use tracing::debug;

pub const TOOLCHAIN_VERSION_ENV: &str = "PLATFORM_TOOLCHAIN_VERSION";

/// Derive the major version from a dotted toolchain version string.
///
/// Legacy `1.x` strings report the second component (`1.8.0_362` is 8);
/// everything else reports the first (`17.0.1` is 17). Trailing empty
/// components are dropped, so `1.` is 1. The input is not trimmed.
pub fn parse_major(version: Option<&str>) -> Result<u32, CatalogError> {
    let Some(raw) = version.filter(|v| !v.is_empty()) else {
        return Err(CatalogError::Parse {
            input: version.map(str::to_string),
            source: None,
        });
    };

    let mut parts: Vec<&str> = raw.split('.').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    let chosen = match parts.as_slice() {
        ["1", second, ..] => *second,
        [first, ..] => *first,
        [] => raw,
    };

    chosen.parse::<u32>().map_err(|err| CatalogError::Parse {
        input: Some(raw.to_string()),
        source: Some(err),
    })
}

/// Locate the host toolchain version string, if any.
pub fn host_toolchain_version() -> Option<String> {
    if let Some(value) = env_non_empty(TOOLCHAIN_VERSION_ENV) {
        debug!(
            source = TOOLCHAIN_VERSION_ENV,
            version = %value,
            "toolchain version from environment"
        );
        return Some(value);
    }
    let probed = probe_java_version();
    if let Some(value) = probed.as_deref() {
        debug!(source = "java", version = %value, "toolchain version from java properties");
    }
    probed
}

fn probe_java_version() -> Option<String> {
    let output = Command::new("java")
        .arg("-XshowSettings:properties")
        .arg("-version")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    // The JVM prints settings on stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    java_version_from_settings(&stderr)
}

fn java_version_from_settings(settings: &str) -> Option<String> {
    settings.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        if key.trim() != "java.version" {
            return None;
        }
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

pub(crate) fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
