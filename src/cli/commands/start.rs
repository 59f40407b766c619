//! Start command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("start")
        .about("Register plugins and build the process engine")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print the engine summary as JSON")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Starting process engine");

    let config = utils::load_config(matches)?;
    let app = utils::create_app(config);
    let summary = app.start()?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Process engine started: {}", summary.engine.name);
    println!(
        "Plugins registered: {} created, {} reused",
        summary.report.created(),
        summary.report.reused()
    );

    if !summary.engine.properties.is_empty() {
        println!("Engine properties:");
        for (key, value) in &summary.engine.properties {
            let value = serde_yaml::to_string(value)?;
            println!("  {} = {}", key, value.trim_end());
        }
    }

    Ok(())
}
