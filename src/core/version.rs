//! The resolved version value and its composition rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Result, VersionError};
use super::properties::Properties;

/// Property key holding the major component.
pub const KEY_MAJOR: &str = "version.major";
/// Property key holding the minor component.
pub const KEY_MINOR: &str = "version.minor";
/// Property key holding the patch component.
pub const KEY_PATCH: &str = "version.patch";
/// Property key holding the version code.
pub const KEY_CODE: &str = "version.code";

/// A resolved version.
///
/// `name` is always derived from the numeric parts and the suffix supplied at
/// resolution time; it is never read from the property file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Build code, independent of the semantic parts.
    pub code: i32,
    /// Display name, `major.minor.patch[.suffix]`.
    pub name: String,
}

impl Version {
    /// Build a version from a parsed property set.
    ///
    /// Keys are checked in the order major, minor, patch, code and the first
    /// failure is reported.
    pub fn from_properties(props: &Properties, suffix: Option<&str>) -> Result<Self> {
        let major = required_part(props, KEY_MAJOR)?;
        let minor = required_part(props, KEY_MINOR)?;
        let patch = required_part(props, KEY_PATCH)?;
        let code = required(props, KEY_CODE)?;

        Ok(Self {
            major,
            minor,
            patch,
            code,
            name: build_version_name(major, minor, patch, suffix),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Compose the display name.
///
/// A suffix is appended only when it is non-blank, and then exactly as given.
#[must_use]
pub fn build_version_name(major: u32, minor: u32, patch: u32, suffix: Option<&str>) -> String {
    let base = format!("{major}.{minor}.{patch}");

    match suffix {
        Some(s) if !s.trim().is_empty() => format!("{base}.{s}"),
        _ => base,
    }
}

fn required<T: FromStr>(props: &Properties, key: &str) -> Result<T> {
    let raw = props.get(key).ok_or_else(|| VersionError::MissingField {
        key: key.to_string(),
    })?;

    raw.trim().parse().map_err(|_| invalid(key, raw))
}

/// Semantic parts share the code's `i32` range but must not be negative.
fn required_part(props: &Properties, key: &str) -> Result<u32> {
    let value: i32 = required(props, key)?;
    u32::try_from(value).map_err(|_| invalid(key, props.get(key).unwrap_or_default()))
}

fn invalid(key: &str, raw: &str) -> VersionError {
    VersionError::InvalidFormat {
        key: key.to_string(),
        value: raw.to_string(),
    }
}
