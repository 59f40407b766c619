//! Validate command implementation

use crate::cli::utils;
use crate::plugin::Outcome;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file and plugin registration")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config = utils::load_config(matches)?;
    let app = utils::create_app(config);

    let known = app.seed_plugins()?;
    let registration = app.register_plugins(known)?;

    let config = app.config();
    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!("Engine: {}", config.engine.name);
    println!("Binding: {:?}", config.binding);
    println!("Seed plugins: {}", config.seed.len());
    println!("Configured plugins: {}", config.plugins.len());

    for entry in &registration.report.plugins {
        let outcome = match entry.outcome {
            Outcome::Created => "created",
            Outcome::Reused => "reused",
        };
        println!(
            "  - {} ({}, {} properties)",
            entry.class_name,
            outcome,
            entry.binding.applied.len()
        );
        for skipped in &entry.binding.skipped {
            println!("      skipped unknown property: {}", skipped);
        }
    }

    Ok(())
}
