//! Typed settings and the on-disk configuration document.

use serde::Deserialize;
use url::Url;

use crate::defaults::{DEFAULT_LISTING_ENABLED, DEFAULT_LOG_LEVEL, DEFAULT_SHOW_HIDDEN};

/// Effective configuration after every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// How location changes are approved.
    pub confirm: ConfirmPolicy,
    /// Directory listing shown after a successful move.
    pub listing: ListingSettings,
    /// Subscriber level and format.
    pub logging: LoggingSettings,
    /// Endpoint receiving command outcome events, if any.
    pub telemetry_endpoint: Option<Url>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            confirm: ConfirmPolicy::Prompt,
            listing: ListingSettings::default(),
            logging: LoggingSettings::default(),
            telemetry_endpoint: None,
        }
    }
}

/// Approval policy for location changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmPolicy {
    /// Ask on the terminal.
    #[default]
    Prompt,
    /// Approve without asking.
    AssumeYes,
}

/// Listing behaviour after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    /// Print the new location's contents.
    pub enabled: bool,
    /// Include dot-files.
    pub show_hidden: bool,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_LISTING_ENABLED,
            show_hidden: DEFAULT_SHOW_HIDDEN,
        }
    }
}

/// Logging settings handed to the telemetry crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Level directive, overridden by `RUST_LOG` at install time.
    pub level: String,
    /// Output format.
    pub format: LogFormatSetting,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormatSetting::Auto,
        }
    }
}

/// Configured log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormatSetting {
    /// Pretty for debug builds, JSON for release builds.
    #[default]
    Auto,
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// JSON configuration file. Every field is optional; unknown fields are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Approval policy.
    #[serde(default)]
    pub confirm: Option<ConfirmPolicy>,
    /// Listing overrides.
    #[serde(default)]
    pub listing: Option<ListingDocument>,
    /// Logging overrides.
    #[serde(default)]
    pub logging: Option<LoggingDocument>,
    /// Telemetry endpoint as written in the file.
    #[serde(default)]
    pub telemetry_endpoint: Option<String>,
}

/// `listing` section of [`ConfigDocument`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingDocument {
    /// Overrides [`ListingSettings::enabled`].
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Overrides [`ListingSettings::show_hidden`].
    #[serde(default)]
    pub show_hidden: Option<bool>,
}

/// `logging` section of [`ConfigDocument`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingDocument {
    /// Overrides [`LoggingSettings::level`].
    #[serde(default)]
    pub level: Option<String>,
    /// Overrides [`LoggingSettings::format`]; `auto`, `pretty`, or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompt_and_list_without_hidden() {
        let config = AppConfig::default();
        assert_eq!(config.confirm, ConfirmPolicy::Prompt);
        assert!(config.listing.enabled);
        assert!(!config.listing.show_hidden);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormatSetting::Auto);
        assert!(config.telemetry_endpoint.is_none());
    }

    #[test]
    fn document_rejects_unknown_fields() {
        let parsed: Result<ConfigDocument, _> =
            serde_json::from_str(r#"{"listing": {"enabled": true, "colour": "red"}}"#);
        assert!(parsed.is_err());

        let parsed: ConfigDocument =
            serde_json::from_str(r#"{"confirm": "assume_yes"}"#).unwrap_or_default();
        assert_eq!(parsed.confirm, Some(ConfirmPolicy::AssumeYes));
    }
}
