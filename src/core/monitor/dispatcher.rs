//! Notification formatting and delivery.

use async_trait::async_trait;

use crate::error::Result;

use super::rules::TriggeredRule;

/// An outbound text channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Markdown markup is allowed.
    async fn send_text(&self, text: &str) -> Result<()>;
}

/// What happened to one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered)
    }
}

/// Turns triggered rules into messages and hands them to a [`Notifier`].
pub struct Dispatcher<N> {
    notifier: N,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Send one notification. Failures are logged and reported, never raised.
    pub async fn send(&self, triggered: &TriggeredRule<'_>) -> DispatchOutcome {
        let message = format_message(triggered);

        match self.notifier.send_text(&message).await {
            Ok(()) => {
                log::debug!("Notification for '{}' delivered", triggered.rule.name);
                DispatchOutcome::Delivered
            }
            Err(e) => {
                log::error!(
                    "Failed to send notification for '{}': {}",
                    triggered.rule.name,
                    e
                );
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Render the notification text for a triggered rule.
pub fn format_message(triggered: &TriggeredRule<'_>) -> String {
    format!(
        "🚨 {}\nMetric: `{}`\nCurrent value: `{:.2}`",
        bold_markdown(&triggered.rule.name),
        triggered.rule.metric,
        triggered.value
    )
}

/// Bold `text` for Telegram's legacy Markdown.
///
/// Escapes are only honoured outside an entity, so the bold run is closed
/// before each special character and reopened after it.
fn bold_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut run = String::new();

    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            push_bold(&mut out, &run);
            run.clear();
            out.push('\\');
            out.push(c);
        } else {
            run.push(c);
        }
    }
    push_bold(&mut out, &run);
    out
}

fn push_bold(out: &mut String, run: &str) {
    if !run.is_empty() {
        out.push('*');
        out.push_str(run);
        out.push('*');
    }
}
