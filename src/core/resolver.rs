//! Resolving a [`Version`] from a property file on disk.

use std::path::{Path, PathBuf};

use super::error::{Result, VersionError};
use super::properties::{Properties, PropertiesError};
use super::version::Version;

/// Default property file name, relative to the project root.
pub const DEFAULT_PROPERTY_FILE: &str = "version.properties";

/// Read the property file at `path` and resolve a [`Version`].
///
/// The file is read on every call; nothing is cached.
///
/// # Errors
///
/// Returns [`VersionError::FileNotFound`] if the file is missing or unreadable,
/// [`VersionError::MissingField`] or [`VersionError::InvalidFormat`] if one of
/// the four version keys is absent or not an integer.
pub fn resolve_version(path: &Path, suffix: Option<&str>) -> Result<Version> {
    tracing::debug!(path = %path.display(), "reading version properties");

    let props = Properties::load(path).map_err(|e| match e {
        PropertiesError::Io(err) => {
            tracing::debug!(error = %err, "property file unreadable");
            file_not_found(path)
        }
        PropertiesError::MalformedUnicodeEscape { line } => VersionError::Malformed {
            path: absolute(path),
            line,
            reason: "malformed \\uXXXX encoding".to_string(),
        },
    })?;

    tracing::debug!(entries = props.len(), "parsed property file");

    let version = Version::from_properties(&props, suffix)?;
    tracing::info!(
        name = %version.name,
        code = version.code,
        "resolved version"
    );

    Ok(version)
}

/// Read the raw property file for diagnostic output.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`VersionError::FileNotFound`] if the file is missing or unreadable.
pub fn dump_file_contents(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|err| {
        tracing::debug!(error = %err, "property file unreadable");
        file_not_found(path)
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_not_found(path: &Path) -> VersionError {
    VersionError::FileNotFound {
        path: absolute(path),
    }
}

/// Best-effort absolute form of `path` that does not require it to exist.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Inputs for version resolution: which file to read and which suffix to apply.
///
/// [`VersionPropDef::version`] re-reads the property file on every call, so
/// edits made between calls are picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPropDef {
    /// Property file to read.
    pub property_file: PathBuf,

    /// Optional suffix appended to the version name.
    pub version_name_suffix: Option<String>,
}

impl VersionPropDef {
    /// Definition rooted at `project_root`, reading `version.properties` there.
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            property_file: project_root.join(DEFAULT_PROPERTY_FILE),
            version_name_suffix: None,
        }
    }

    /// Use a different property file.
    #[must_use]
    pub fn with_property_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.property_file = path.into();
        self
    }

    /// Set the version name suffix.
    #[must_use]
    pub fn with_version_name_suffix(mut self, suffix: Option<String>) -> Self {
        self.version_name_suffix = suffix;
        self
    }

    /// Resolve the version from the current file contents.
    ///
    /// # Errors
    ///
    /// See [`resolve_version`].
    pub fn version(&self) -> Result<Version> {
        resolve_version(&self.property_file, self.version_name_suffix.as_deref())
    }

    /// Raw property file contents.
    ///
    /// # Errors
    ///
    /// See [`dump_file_contents`].
    pub fn file_contents(&self) -> Result<String> {
        dump_file_contents(&self.property_file)
    }
}
