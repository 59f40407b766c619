//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("engine-run")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Register configured plugins and bootstrap a process engine")
            .subcommand_negates_reqs(true)
            .subcommand(commands::validate::command())
            .subcommand(commands::plugins::command())
            .subcommand(commands::start::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("plugins", sub_matches)) => commands::plugins::run(sub_matches).await,
            Some(("start", sub_matches)) => commands::start::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use clap::Arg;
    use std::path::PathBuf;

    /// The `--config` argument shared by commands that read a run configuration
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Candidate configuration files, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("engine-run.yaml"),
            PathBuf::from("engine-run.yml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("engine-run").join("config.yaml"));
        }

        paths
    }

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        default_config_paths()
            .into_iter()
            .find(|path| path.exists())
            .ok_or_else(|| {
                anyhow!("No configuration file found. Use --config to specify a file or create engine-run.yaml")
            })
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        let config_path = get_config_path(matches)?;
        tracing::debug!("Loading configuration from {:?}", config_path);
        crate::Config::from_file(&config_path)
    }

    /// Create EngineRun instance
    pub fn create_app(config: crate::Config) -> crate::EngineRun {
        crate::EngineRun::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        CliApp::app().debug_assert();
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let matches = CliApp::app()
            .try_get_matches_from(["engine-run", "validate", "--config", "custom.yaml"])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();

        assert_eq!(
            utils::get_config_path(sub_matches).unwrap(),
            std::path::PathBuf::from("custom.yaml")
        );
    }
}
