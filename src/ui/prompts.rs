// UI prompts and user interaction module

use colored::Colorize;
use dialoguer::{Input, Select};

use crate::core::monitor::{Comparator, Metric, Rule};

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", format!("✅ {}", message).green().bold());
}

/// Display an error message
pub fn error(message: &str) {
    println!("{}", format!("❌ {}", message).red().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Display a bold white message
pub fn bold(message: &str) {
    println!("{}", message.white().bold());
}

/// Walk the user through creating a new alert rule.
///
/// Every field is re-prompted until it is valid, so the returned rule is
/// always well formed.
pub fn prompt_new_rule() -> anyhow::Result<Rule> {
    bold("=== Create new alert ===");

    let name: String = Input::new()
        .with_prompt("Alert name")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("Alert name must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let metric_labels: Vec<String> = Metric::ALL
        .iter()
        .map(|metric| format!("{:<18} {}", metric.as_str(), metric.description()))
        .collect();
    let metric_index = Select::new()
        .with_prompt("Metric")
        .items(&metric_labels)
        .default(0)
        .interact()?;
    let metric = Metric::ALL[metric_index];

    let comparators = [Comparator::GreaterThan, Comparator::LessThan];
    let comparator_labels = ["> (greater than)", "< (less than)"];
    let comparator_index = Select::new()
        .with_prompt("Comparator")
        .items(&comparator_labels)
        .default(0)
        .interact()?;
    let comparator = comparators[comparator_index];

    let threshold: f64 = Input::new()
        .with_prompt("Threshold value (number)")
        .validate_with(|input: &f64| -> Result<(), &'static str> {
            if input.is_finite() {
                Ok(())
            } else {
                Err("Threshold must be a finite number")
            }
        })
        .interact_text()?;

    Ok(Rule::new(name, metric, comparator, threshold)?)
}
