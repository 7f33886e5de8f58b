//! CLI command parsing and output formatting.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::Version;

/// Derive an app version from a properties file.
#[derive(Parser)]
#[command(name = "version-prop")]
#[command(about = "Derive an app version from a properties file")]
#[command(version, long_version = crate::build_info::version_string())]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root directory.
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Property file to read (relative to the project root).
    #[arg(short = 'f', long, global = true)]
    pub property_file: Option<PathBuf>,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print the version.
    #[command(visible_alias = "r")]
    Resolve {
        /// Suffix appended to the version name when non-blank.
        #[arg(short, long)]
        suffix: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print a single field instead of the whole version.
        #[arg(long, value_enum)]
        field: Option<Field>,
    },

    /// Print the raw property file.
    Print,

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path.
    Path,
}

/// How `resolve` prints the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Version name only.
    Text,
    /// JSON object.
    Json,
    /// TOML table.
    Toml,
    /// Shell `KEY=value` lines.
    Env,
    /// `cargo:rustc-env` directives for build scripts.
    Cargo,
}

/// A single version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Code,
    Name,
}

impl Field {
    /// The field's value rendered as text.
    #[must_use]
    pub fn value(self, version: &Version) -> String {
        match self {
            Self::Major => version.major.to_string(),
            Self::Minor => version.minor.to_string(),
            Self::Patch => version.patch.to_string(),
            Self::Code => version.code.to_string(),
            Self::Name => version.name.clone(),
        }
    }
}

/// Environment variable names paired with their fields, in output order.
const ENV_VARS: [(&str, Field); 5] = [
    ("VERSION_MAJOR", Field::Major),
    ("VERSION_MINOR", Field::Minor),
    ("VERSION_PATCH", Field::Patch),
    ("VERSION_CODE", Field::Code),
    ("VERSION_NAME", Field::Name),
];

/// Render a version in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(version: &Version, format: OutputFormat) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Text => version.name.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(version)?,
        OutputFormat::Toml => toml::to_string_pretty(version)?.trim_end().to_string(),
        OutputFormat::Env => {
            let mut out = String::new();
            for (name, field) in ENV_VARS {
                let value = field.value(version);
                writeln!(out, "{name}={}", shell_quote(&value))?;
            }
            out.trim_end().to_string()
        }
        OutputFormat::Cargo => {
            let mut out = String::new();
            for (name, field) in ENV_VARS {
                writeln!(out, "cargo:rustc-env={name}={}", field.value(version))?;
            }
            out.trim_end().to_string()
        }
    };
    Ok(out)
}

/// Quote a value for POSIX shells when it contains anything unusual.
fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn sample() -> Version {
        Version {
            major: 2,
            minor: 5,
            patch: 1,
            code: 17,
            name: "2.5.1.42".to_string(),
        }
    }

    #[test]
    fn cli_parses_resolve_with_defaults() {
        let cli = Cli::parse_from(["version-prop", "resolve"]);
        assert_eq!(cli.project_dir, PathBuf::from("."));
        assert!(cli.property_file.is_none());
        match cli.command {
            Commands::Resolve {
                suffix,
                format,
                field,
            } => {
                assert!(suffix.is_none());
                assert_eq!(format, OutputFormat::Text);
                assert!(field.is_none());
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_parses_resolve_options() {
        let cli = Cli::parse_from([
            "version-prop",
            "r",
            "-s",
            "42",
            "--format",
            "json",
            "--field",
            "code",
        ]);
        match cli.command {
            Commands::Resolve {
                suffix,
                format,
                field,
            } => {
                assert_eq!(suffix.as_deref(), Some("42"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(field, Some(Field::Code));
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "version-prop",
            "print",
            "-C",
            "/work",
            "-f",
            "app.properties",
            "-vv",
        ]);
        assert!(matches!(cli.command, Commands::Print));
        assert_eq!(cli.project_dir, PathBuf::from("/work"));
        assert_eq!(cli.property_file, Some(PathBuf::from("app.properties")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_config_commands() {
        let cli = Cli::parse_from(["version-prop", "config", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));

        let cli = Cli::parse_from(["version-prop", "config", "path"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Path
            }
        ));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["version-prop"]).is_err());
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["version-prop", "resolve", "--format", "xml"]).is_err());
    }

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_text() {
        assert_eq!(render(&sample(), OutputFormat::Text).unwrap(), "2.5.1.42");
    }

    #[test]
    fn render_json_has_all_fields() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["major"], 2);
        assert_eq!(value["minor"], 5);
        assert_eq!(value["patch"], 1);
        assert_eq!(value["code"], 17);
        assert_eq!(value["name"], "2.5.1.42");
    }

    #[test]
    fn render_toml_parses_back() {
        let out = render(&sample(), OutputFormat::Toml).unwrap();
        let parsed: Version = toml::from_str(&out).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn render_env_lines() {
        let out = render(&sample(), OutputFormat::Env).unwrap();
        assert_eq!(
            out,
            "VERSION_MAJOR=2\nVERSION_MINOR=5\nVERSION_PATCH=1\nVERSION_CODE=17\nVERSION_NAME=2.5.1.42"
        );
    }

    #[test]
    fn render_env_quotes_unusual_names() {
        let mut version = sample();
        version.name = "2.5.1.it's here".to_string();
        let out = render(&version, OutputFormat::Env).unwrap();
        assert!(out.ends_with(r"VERSION_NAME='2.5.1.it'\''s here'"));
    }

    #[test]
    fn render_cargo_directives() {
        let out = render(&sample(), OutputFormat::Cargo).unwrap();
        assert!(out.starts_with("cargo:rustc-env=VERSION_MAJOR=2\n"));
        assert!(out.ends_with("cargo:rustc-env=VERSION_NAME=2.5.1.42"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn field_values() {
        let version = sample();
        assert_eq!(Field::Major.value(&version), "2");
        assert_eq!(Field::Code.value(&version), "17");
        assert_eq!(Field::Name.value(&version), "2.5.1.42");
    }
}
