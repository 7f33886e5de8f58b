//! Derive an app version from a properties file.
//!
//! A property file holds four integer keys:
//!
//! ```text
//! version.major=2
//! version.minor=5
//! version.patch=1
//! version.code=17
//! ```
//!
//! [`resolve_version`] reads it and composes the display name
//! `major.minor.patch`, followed by `.suffix` when a non-blank suffix is given.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let version = version_prop::resolve_version(Path::new("version.properties"), Some("42"))?;
//! assert_eq!(version.name, "2.5.1.42");
//! # Ok::<(), version_prop::VersionError>(())
//! ```

pub mod build_info;
pub mod cli;
pub mod config;
pub mod core;

pub use config::Config;
pub use crate::core::{
    Properties, Version, VersionError, VersionPropDef, build_version_name, dump_file_contents,
    resolve_version,
};
