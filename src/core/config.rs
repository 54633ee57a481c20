use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::monitor::{rules_from_records, Rule, RuleRecord};
use crate::error::{Result, WarlockError};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "WARLOCK_CONFIG";

/// Telegram credentials as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
}

/// A fully configured notification destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub alerts: Vec<RuleRecord>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path).map_err(|e| {
            WarlockError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    WarlockError::config(format!(
                        "Failed to create config directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }

        let data = serde_yaml::to_string(self)?;
        fs::write(path, data).map_err(|e| {
            WarlockError::config(format!("Failed to write config file {:?}: {}", path, e))
        })?;

        Ok(())
    }

    /// `WARLOCK_CONFIG` if set, otherwise the per-user config directory
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| WarlockError::config("Could not determine config directory"))?;

        Ok(config_dir.join("warlock").join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        for record in &self.alerts {
            if !record.threshold.is_finite() {
                return Err(WarlockError::config(format!(
                    "alert '{}' has a non-finite threshold",
                    record.name
                )));
            }
        }

        let mut ids: Vec<&str> = self.alerts.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(WarlockError::config(format!(
                "duplicate alert id '{}'",
                pair[0]
            )));
        }

        Ok(())
    }

    // Notification channel

    pub fn set_token(&mut self, token: String) {
        self.telegram.token = token;
    }

    pub fn set_chat_id(&mut self, chat_id: String) {
        self.telegram.chat_id = chat_id;
    }

    /// The configured channel, or `None` if either credential is blank
    pub fn notification_channel(&self) -> Option<NotificationChannel> {
        let token = self.telegram.token.trim();
        let chat_id = self.telegram.chat_id.trim();
        if token.is_empty() || chat_id.is_empty() {
            return None;
        }

        Some(NotificationChannel {
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    // Alerts

    pub fn add_alert(&mut self, rule: &Rule) {
        self.alerts.push(RuleRecord::from(rule));
    }

    /// Remove the alert with `id`. Returns false if none matched.
    pub fn remove_alert(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Alerts that can be evaluated; records with unknown metrics are skipped
    pub fn rules(&self) -> Vec<Rule> {
        rules_from_records(&self.alerts)
    }
}
