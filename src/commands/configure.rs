use anyhow::{Context, Result};
use std::path::Path;

use crate::core::Config;
use crate::ui;

pub fn execute(matches: &clap::ArgMatches, config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path).context("Failed to load config")?;

    if !apply_changes(
        &mut config,
        matches.get_one::<String>("bot-token"),
        matches.get_one::<String>("chat-id"),
    ) {
        ui::error("No configuration changes provided.");
        ui::dimmed("Usage: warlock configure --bot-token <TOKEN> --chat-id <CHAT_ID>");
        return Ok(());
    }

    config
        .save_to(config_path)
        .context("Failed to save config")?;
    Ok(())
}

/// Apply the given credentials. Returns true if anything changed.
pub fn apply_changes(
    config: &mut Config,
    bot_token: Option<&String>,
    chat_id: Option<&String>,
) -> bool {
    let mut changed = false;

    if let Some(token) = bot_token {
        config.set_token(token.trim().to_string());
        ui::success("Telegram bot token updated.");
        changed = true;
    }

    if let Some(chat_id) = chat_id {
        config.set_chat_id(chat_id.trim().to_string());
        ui::success("Telegram chat_id updated.");
        changed = true;
    }

    changed
}
