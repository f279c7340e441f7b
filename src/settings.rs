//! Runtime settings
//!
//! Defaults suit the browser build; native runs can override via environment.

use serde::{Deserialize, Serialize};

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Storage key holding the whole blob
    pub storage_key: String,
    /// Run the backend self-test before loading
    pub probe_on_start: bool,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: crate::consts::STORAGE_KEY.to_string(),
            probe_on_start: true,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Defaults overridden by `TODO_STORAGE_KEY`, `TODO_PROBE` and `TODO_LOG_LEVEL`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(key) = lookup("TODO_STORAGE_KEY").filter(|k| !k.trim().is_empty()) {
            settings.storage_key = key;
        }
        if let Some(probe) = lookup("TODO_PROBE") {
            settings.probe_on_start =
                !matches!(probe.to_lowercase().as_str(), "0" | "false" | "off" | "no");
        }
        if let Some(level) = lookup("TODO_LOG_LEVEL") {
            match LogLevel::from_str(&level) {
                Some(level) => settings.log_level = level,
                None => log::warn!("Unknown log level {:?}, using {}", level, settings.log_level.as_str()),
            }
        }

        settings
    }
}
