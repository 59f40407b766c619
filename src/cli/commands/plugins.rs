//! Plugin listing command

use crate::{EngineRun, PluginKind};
use anyhow::Result;
use clap::{ArgMatches, Command};

/// Create the plugins command
pub fn command() -> Command {
    Command::new("plugins")
        .about("List plugin types available for registration")
        .arg(
            clap::Arg::new("detailed")
                .short('d')
                .long("detailed")
                .help("Show properties and supertypes")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");
    let app = EngineRun::new(crate::Config::default());

    println!("Available plugins:");
    for info in app.plugin_info() {
        let kind = match info.kind {
            PluginKind::Plugin => "plugin",
            PluginKind::Abstract => "abstract",
            PluginKind::Foreign => "not a plugin",
            PluginKind::Broken => "broken",
        };
        println!("  - {} ({})", info.class_name, kind);

        if detailed {
            if !info.supertypes.is_empty() {
                println!("      extends: {}", info.supertypes.join(", "));
            }
            if !info.properties.is_empty() {
                println!("      properties: {}", info.properties.join(", "));
            }
        }
    }

    Ok(())
}
