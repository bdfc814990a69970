//! File-based logging configuration.
//!
//! ```toml
//! application-name = "billing"
//! minimum-level = "warning"
//! format = "json"
//! ```
//!
//! Every key is optional; missing keys take the values of [`LoggingConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Severity};

/// Output format selected by a [`LoggingConfig`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Human-readable lines, see [`ConsoleProvider`](crate::ConsoleProvider).
    #[default]
    Pretty,
    /// JSON lines on stdout, see [`JsonProvider`](crate::JsonProvider).
    Json,
}

/// Settings used by [`LoggerBuilder::use_config`](crate::LoggerBuilder::use_config).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoggingConfig {
    /// Name of the application, attached to JSON records.
    pub application_name: String,
    /// Name of the host, attached to JSON records.
    pub host_name: String,
    /// Entries below this severity are skipped.
    pub minimum_level: Severity,
    /// Output format.
    pub format: LogFormat,
    /// Prefix console lines with the local time.
    pub timestamps: bool,
    /// Colour console lines by severity.
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            application_name: String::from("phyros"),
            host_name: default_host_name(),
            minimum_level: Severity::Information,
            format: LogFormat::Pretty,
            timestamps: true,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

fn default_host_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| String::from("localhost"))
}
