use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use version_prop::{
    Config,
    cli::{self, Cli, Commands, ConfigCommands},
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let project_dir = cli.project_dir;
    let mut config = Config::load(&project_dir)?;

    match cli.command {
        Commands::Resolve {
            suffix,
            format,
            field,
        } => {
            config.merge_overrides(cli.property_file, suffix);
            let version = config.definition(&project_dir).version()?;

            let out = match field {
                Some(field) => field.value(&version),
                None => cli::render(&version, format)?,
            };
            println!("{out}");
        }

        Commands::Print => {
            config.merge_overrides(cli.property_file, None);
            let def = config.definition(&project_dir);
            let content = def.file_contents()?;
            let path = std::path::absolute(&def.property_file)?;
            println!(
                "Properties file, located at {} has content:\n{content}",
                path.display()
            );
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                config.merge_overrides(cli.property_file, None);
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigCommands::Path => {
                println!("{}", Config::config_path(&project_dir).display());
            }
        },
    }

    Ok(())
}
