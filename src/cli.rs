use clap::{Arg, ArgAction, Command};

/// Build the command-line interface
pub fn build_cli() -> Command {
    Command::new("warlock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("System monitoring CLI tool")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file to use instead of the default location")
                .global(true),
        )
        .subcommand(
            Command::new("metrics")
                .visible_alias("m")
                .about("Metrics commands")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("ls")
                        .visible_alias("list")
                        .about("List available metrics"),
                ),
        )
        .subcommand(
            Command::new("alerts")
                .visible_alias("a")
                .about("Alert commands (list, create, remove)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("ls")
                        .visible_alias("list")
                        .about("List configured alerts"),
                )
                .subcommand(
                    Command::new("cr")
                        .visible_alias("create")
                        .about("Create a new alert interactively"),
                )
                .subcommand(
                    Command::new("rm")
                        .visible_alias("remove")
                        .about("Remove an alert by ID")
                        .arg(
                            Arg::new("alert_id")
                                .help("Alert ID to remove")
                                .index(1),
                        ),
                ),
        )
        .subcommand(
            Command::new("run")
                .visible_alias("r")
                .about("Run monitoring")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECONDS")
                        .help("Seconds to wait between checks")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("5"),
                ),
        )
        .subcommand(
            Command::new("configure")
                .visible_alias("c")
                .about("Configure Telegram settings")
                .arg(
                    Arg::new("bot-token")
                        .short('b')
                        .long("bot-token")
                        .value_name("TOKEN")
                        .help("Telegram bot token")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("chat-id")
                        .short('c')
                        .long("chat-id")
                        .value_name("CHAT_ID")
                        .help("Telegram chat ID (group chats are negative)")
                        .allow_hyphen_values(true)
                        .action(ArgAction::Set),
                ),
        )
}
