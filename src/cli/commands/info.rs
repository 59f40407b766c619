//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("EngineRun - Process engine plugin bootstrap");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    if detailed {
        println!("\nDetailed Information:");
        println!("  - Plugins configured by class name in YAML");
        println!("  - Configured plugins merge onto host-provided instances");
        println!("  - Type-directed property binding with strict or lenient mode");
        println!("  - Registered plugins reach the engine as one composite plugin");
        println!("\nConfiguration lookup order:");
        for path in crate::cli::utils::default_config_paths() {
            println!("  - {}", path.display());
        }
    }

    Ok(())
}
