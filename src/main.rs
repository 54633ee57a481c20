use anyhow::Result;
use std::path::PathBuf;

use warlock::cli::build_cli;
use warlock::commands;
use warlock::Config;

fn main() -> Result<()> {
    warlock::init_logging();

    let mut cli = build_cli();
    let matches = cli.get_matches_mut();

    let config_path = match matches.get_one::<String>("config") {
        Some(path) => PathBuf::from(path),
        None => Config::get_config_path()?,
    };

    match matches.subcommand() {
        Some(("metrics", sub_matches)) => commands::metrics(sub_matches),
        Some(("alerts", sub_matches)) => commands::alerts::execute(sub_matches, &config_path),
        Some(("run", sub_matches)) => commands::run(sub_matches, &config_path),
        Some(("configure", sub_matches)) => {
            commands::configure::execute(sub_matches, &config_path)
        }
        _ => {
            cli.print_help()?;
            println!();
            Ok(())
        }
    }
}
