use anyhow::Result;

use crate::core::monitor::Metric;
use crate::ui::{bold, format_metric_line};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("ls", _)) => {
            list_metrics();
            Ok(())
        }
        _ => {
            println!("Use 'warlock metrics --help' for more information.");
            Ok(())
        }
    }
}

fn list_metrics() {
    bold("Available metrics:");
    for metric in Metric::ALL {
        println!("{}", format_metric_line(metric));
    }
}
