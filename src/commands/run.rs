//! Run command handler.
//!
//! Starts the monitoring loop and keeps it running until Ctrl+C.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::core::monitor::{Dispatcher, Monitor, Sampler, SysinfoSource, TelegramNotifier};
use crate::core::Config;
use crate::ui;

/// Execute the run command
pub fn execute(matches: &clap::ArgMatches, config_path: &Path) -> Result<()> {
    let interval = matches.get_one::<u64>("interval").copied().unwrap_or(5);

    let config = Config::load_from(config_path).context("Failed to load config")?;

    let channel = config.notification_channel().ok_or_else(|| {
        anyhow!(
            "Telegram token and chat_id are not set. Configure them first with \
             'warlock configure --bot-token <TOKEN> --chat-id <CHAT_ID>'"
        )
    })?;

    let rules = config.rules();
    if rules.is_empty() {
        ui::warn("No usable alerts configured; metrics will be sampled but nothing will be sent.");
    }

    // Create shared shutdown signal
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    ctrlc::set_handler(move || {
        println!();
        ui::warn("Shutdown requested, stopping monitor...");
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("warlock-worker")
        .build()
        .context("Failed to start async runtime")?;

    ui::info(&format!(
        "Monitoring {} alert(s) every {}s. Press Ctrl+C to stop.",
        rules.len(),
        interval
    ));

    let summary = runtime.block_on(async move {
        let notifier = TelegramNotifier::new(&channel).context("Failed to set up Telegram")?;
        let sampler = Sampler::new(SysinfoSource::new());
        let mut monitor = Monitor::new(sampler, rules, Dispatcher::new(notifier))
            .with_interval(Duration::from_secs(interval));
        Ok::<_, anyhow::Error>(monitor.run(shutdown_rx).await)
    })?;

    ui::dimmed(&ui::format_summary(&summary));
    Ok(())
}
