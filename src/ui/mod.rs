// UI and formatting module

pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_alert_line, format_metric_line, format_summary, format_threshold};
pub use prompts::{bold, dimmed, error, info, prompt_new_rule, success, warn};
