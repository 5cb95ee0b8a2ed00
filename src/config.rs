//! Configuration handling for the booking form and the relay

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How the relay hands mail off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Pipe into a local `sendmail -t -i`
    #[default]
    Sendmail,
    /// Log the message instead of sending it
    Log,
}

/// Configuration shared by the booking form and the relay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BookingConfig {
    /// Relay endpoint the form posts to. Without one the form confirms locally.
    pub relay_url: Option<String>,
    /// Relay request timeout in seconds
    pub request_timeout_secs: u64,
    /// Options offered by the service field
    pub services: Vec<String>,
    /// Address the relay listens on
    pub bind: String,
    /// Where booking notifications are delivered
    pub recipient: String,
    /// `From` mailbox used when a request carries no usable address
    pub sender: String,
    /// Mail hand-off used by the relay
    pub transport: TransportKind,
    /// Path of the sendmail binary
    pub sendmail_path: PathBuf,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            request_timeout_secs: 10,
            services: vec![
                "Consultation".to_string(),
                "Standard appointment".to_string(),
                "Extended appointment".to_string(),
                "Follow-up".to_string(),
            ],
            bind: "127.0.0.1:8080".to_string(),
            recipient: "your-email@example.com".to_string(),
            sender: "Booking Desk <booking-desk@example.com>".to_string(),
            transport: TransportKind::Sendmail,
            sendmail_path: PathBuf::from("/usr/sbin/sendmail"),
        }
    }
}

impl BookingConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "booking-desk", "booking-desk")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory the terminal form writes its log file to
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("loading config from {}", path.display());
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Save configuration to file, returning where it was written
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(Some(path))
    }

    /// Apply `BOOKING_*` overrides read through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("BOOKING_RELAY_URL") {
            self.relay_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(bind) = lookup("BOOKING_BIND") {
            self.bind = bind;
        }
        if let Some(recipient) = lookup("BOOKING_RECIPIENT") {
            self.recipient = recipient;
        }
        if let Some(sender) = lookup("BOOKING_SENDER") {
            self.sender = sender;
        }
        if let Some(path) = lookup("BOOKING_SENDMAIL") {
            self.sendmail_path = PathBuf::from(path);
        }
        self
    }
}
