//! Startup configuration.
//!
//! Loaded once from TOML, then handed to the command table and the
//! telemetry sink. Every section is optional; missing keys fall back to
//! the defaults below.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Default collector endpoint for usage events.
pub const DEFAULT_TRACK_ENDPOINT: &str = "https://collector.termfolio.dev/track";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TermfolioConfig {
    pub profile: ProfileLinks,
    pub candidate: CandidateInfo,
    pub telemetry: TelemetryConfig,
}

/// The four external strings consumed by the contact commands.
///
/// Values are passed through untouched; no format validation happens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileLinks {
    pub linkedin_url: String,
    pub github_url: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl Default for ProfileLinks {
    fn default() -> Self {
        Self {
            linkedin_url: "https://www.linkedin.com/in/termfolio".to_string(),
            github_url: "https://github.com/termfolio".to_string(),
            contact_email: "hello@termfolio.dev".to_string(),
            contact_phone: String::new(),
        }
    }
}

/// Content for the `about`, `motivation` and `start-time` commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CandidateInfo {
    pub name: String,
    pub role: String,
    /// Availability windows, rendered one per line.
    pub windows: Vec<String>,
    pub motivation: Vec<String>,
}

impl Default for CandidateInfo {
    fn default() -> Self {
        Self {
            name: "Termfolio Candidate".to_string(),
            role: "Software Engineer".to_string(),
            windows: vec![
                "Immediately".to_string(),
                "Remote or hybrid".to_string(),
            ],
            motivation: vec![
                "I need a job.".to_string(),
                "I like shipping small tools that people actually use.".to_string(),
            ],
        }
    }
}

/// Telemetry collector settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Bearer credential attached on the fallback request path.
    pub token: String,
    /// How long shutdown waits for in-flight deliveries.
    pub flush_timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_TRACK_ENDPOINT.to_string(),
            token: String::new(),
            flush_timeout_ms: 1500,
        }
    }
}

impl TermfolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `TERMFOLIO_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("TERMFOLIO_TRACK_TOKEN") {
            self.telemetry.token = token;
        }
        if let Some(endpoint) = lookup("TERMFOLIO_TRACK_ENDPOINT") {
            self.telemetry.endpoint = endpoint;
        }
        if let Some(flag) = lookup("TERMFOLIO_TELEMETRY") {
            self.telemetry.enabled = !matches!(flag.trim(), "0" | "false" | "off" | "");
        }
    }
}
