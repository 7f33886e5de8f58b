//! Build information for `--version` output.

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git commit hash, or `unknown` outside a checkout.
pub const BUILD_HASH: &str = env!("BUILD_HASH");

const BUILD_DIRTY: &str = env!("BUILD_DIRTY");

/// Full version string including hash and dirty indicator.
///
/// Format: `1.0.0 (abc1234)` or `1.0.0 (abc1234*)` if dirty.
#[must_use]
pub fn version_string() -> String {
    let dirty = if BUILD_DIRTY == "true" { "*" } else { "" };
    format!("{VERSION} ({BUILD_HASH}{dirty})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_package_version() {
        let version = version_string();
        assert!(version.starts_with(VERSION));
        assert!(version.contains(BUILD_HASH));
    }
}
