//! Process-wide settings, persisted as YAML and addressable by key.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Keys accepted by [`Config::get_value`] / [`Config::set_value`].
pub const KEYS: [&str; 8] = [
    "workbook",
    "email_notifications",
    "team_emails",
    "ai_api_key",
    "ai_command",
    "blob_dir",
    "outbox",
    "cache_ttl_ms",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the workbook file holding every sheet.
    pub workbook: String,
    #[serde(default)]
    pub email_notifications: bool,
    /// Comma separated recipients of new work order notifications.
    #[serde(default)]
    pub team_emails: String,
    #[serde(default)]
    pub ai_api_key: String,
    /// External command producing checklist suggestions (prompt on stdin).
    #[serde(default)]
    pub ai_command: String,
    #[serde(default = "default_blob_dir")]
    pub blob_dir: String,
    #[serde(default = "default_outbox")]
    pub outbox: String,
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
}

fn default_blob_dir() -> String {
    Config::config_dir()
        .join("photos")
        .to_string_lossy()
        .to_string()
}

fn default_outbox() -> String {
    Config::config_dir()
        .join("outbox.log")
        .to_string_lossy()
        .to_string()
}

fn default_cache_ttl_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: Self::workbook_file().to_string_lossy().to_string(),
            email_notifications: false,
            team_emails: String::new(),
            ai_api_key: String::new(),
            ai_command: String::new(),
            blob_dir: default_blob_dir(),
            outbox: default_outbox(),
            cache_ttl_ms: default_cache_ttl_ms(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hotelmaint")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hotelmaint")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hotelmaint.conf")
    }

    /// Return the default path of the workbook
    pub fn workbook_file() -> PathBuf {
        Self::config_dir().join("hotelmaint.workbook")
    }

    /// Load configuration from `path`, or return defaults if not found
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    /// Notification recipients, blank entries dropped.
    pub fn recipients(&self) -> Vec<String> {
        self.team_emails
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn get_value(&self, key: &str) -> AppResult<String> {
        let value = match key {
            "workbook" => self.workbook.clone(),
            "email_notifications" => self.email_notifications.to_string(),
            "team_emails" => self.team_emails.clone(),
            "ai_api_key" => self.ai_api_key.clone(),
            "ai_command" => self.ai_command.clone(),
            "blob_dir" => self.blob_dir.clone(),
            "outbox" => self.outbox.clone(),
            "cache_ttl_ms" => self.cache_ttl_ms.to_string(),
            other => return Err(AppError::UnknownConfigKey(other.to_string())),
        };
        Ok(value)
    }

    /// Set a value by key.
    ///
    /// Blank values for `workbook` and `ai_api_key` are ignored so that a
    /// configured workbook or credential is never wiped by an empty form.
    pub fn set_value(&mut self, key: &str, value: &str) -> AppResult<()> {
        let trimmed = value.trim();
        match key {
            "workbook" => {
                if !trimmed.is_empty() {
                    self.workbook = trimmed.to_string();
                }
            }
            "email_notifications" => {
                self.email_notifications = matches!(
                    trimmed.to_lowercase().as_str(),
                    "true" | "yes" | "1" | "on"
                );
            }
            "team_emails" => self.team_emails = trimmed.to_string(),
            "ai_api_key" => {
                if !trimmed.is_empty() {
                    self.ai_api_key = trimmed.to_string();
                }
            }
            "ai_command" => self.ai_command = trimmed.to_string(),
            "blob_dir" => self.blob_dir = trimmed.to_string(),
            "outbox" => self.outbox = trimmed.to_string(),
            "cache_ttl_ms" => {
                self.cache_ttl_ms = trimmed.parse().map_err(|_| {
                    AppError::Config(format!("cache_ttl_ms must be a number, got '{trimmed}'"))
                })?;
            }
            other => return Err(AppError::UnknownConfigKey(other.to_string())),
        }
        Ok(())
    }
}
