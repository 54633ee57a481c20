use colored::*;

use crate::core::monitor::{Metric, MonitorSummary, RuleRecord};

/// Format a threshold without a trailing `.0` for whole numbers
pub fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 && threshold.abs() < 1e15 {
        format!("{:.0}", threshold)
    } else {
        threshold.to_string()
    }
}

/// One line of `alerts ls` output
pub fn format_alert_line(index: usize, alert: &RuleRecord) -> String {
    let known = alert.metric.parse::<Metric>().is_ok();
    let metric = if known {
        alert.metric.yellow()
    } else {
        format!("{} (unknown metric)", alert.metric).red()
    };

    format!(
        "{}. ID: {} | Name: {} | Metric: {} {} {}",
        index,
        alert.id.dimmed(),
        alert.name.cyan().bold(),
        metric,
        alert.comparator,
        format_threshold(alert.threshold)
    )
}

/// One line of `metrics ls` output
pub fn format_metric_line(metric: Metric) -> String {
    format!(
        " - {} {}",
        format!("{:<18}", metric.as_str()).cyan(),
        metric.description().dimmed()
    )
}

pub fn format_summary(summary: &MonitorSummary) -> String {
    format!(
        "{} tick(s), {} alert(s) triggered, {} notification(s) sent, {} failed",
        summary.ticks, summary.triggered, summary.delivered, summary.failed
    )
}
