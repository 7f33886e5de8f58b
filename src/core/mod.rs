//! Version resolution shared by the library API and the CLI.

mod error;
pub mod properties;
pub mod resolver;
pub mod version;

pub use error::{Result, VersionError};
pub use properties::Properties;
pub use resolver::{DEFAULT_PROPERTY_FILE, VersionPropDef, dump_file_contents, resolve_version};
pub use version::{Version, build_version_name};
