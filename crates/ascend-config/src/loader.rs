//! Layered configuration loading.
//!
//! # Design
//! - Precedence, lowest first: built-in defaults, JSON file, `ASCEND_*` environment.
//! - Environment access goes through an injected lookup so callers and tests
//!   choose the source; [`ConfigLoader::new`] reads the process environment.
//! - A missing explicit file is an error; no file at all is fine.

use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, ConfigDocument, ConfirmPolicy};
use crate::validate::{parse_endpoint, parse_flag, parse_level, parse_log_format};

/// Approve location changes without prompting.
pub const ENV_ASSUME_YES: &str = "ASCEND_ASSUME_YES";
/// Include dot-files in listings.
pub const ENV_SHOW_HIDDEN: &str = "ASCEND_SHOW_HIDDEN";
/// Enable or disable the listing after a move.
pub const ENV_LIST: &str = "ASCEND_LIST";
/// Subscriber level directive.
pub const ENV_LOG_LEVEL: &str = "ASCEND_LOG_LEVEL";
/// Subscriber format: `auto`, `pretty`, `json`.
pub const ENV_LOG_FORMAT: &str = "ASCEND_LOG_FORMAT";
/// Endpoint receiving outcome events.
pub const ENV_TELEMETRY_ENDPOINT: &str = "ASCEND_TELEMETRY_ENDPOINT";
/// Configuration file path when none is given explicitly.
pub const ENV_CONFIG: &str = "ASCEND_CONFIG";

const ENV_SECTION: &str = "env";

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builds an [`AppConfig`] from defaults, an optional file, and the environment.
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: EnvLookup,
}

impl ConfigLoader {
    /// Loader reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(|name| std::env::var(name).ok())
    }

    /// Loader reading variables through `lookup`.
    #[must_use]
    pub fn with_env(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            file: None,
            env: Box::new(lookup),
        }
    }

    /// Use `path` as the configuration file instead of `ASCEND_CONFIG`.
    #[must_use]
    pub fn file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }

    /// Apply every layer and return the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Json`] when the file
    /// cannot be read or parsed, and [`ConfigError::InvalidField`] for any
    /// value that fails validation.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = self.file_path() {
            let document = read_document(&path)?;
            apply_document(&mut config, document)?;
            debug!(path = %path.display(), "configuration file applied");
        }

        self.apply_env(&mut config)?;
        Ok(config)
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            self.var(ENV_CONFIG)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.env)(name)
    }

    fn apply_env(&self, config: &mut AppConfig) -> ConfigResult<()> {
        if let Some(raw) = self.var(ENV_ASSUME_YES) {
            config.confirm = if parse_flag(ENV_SECTION, ENV_ASSUME_YES, &raw)? {
                ConfirmPolicy::AssumeYes
            } else {
                ConfirmPolicy::Prompt
            };
        }
        if let Some(raw) = self.var(ENV_SHOW_HIDDEN) {
            config.listing.show_hidden = parse_flag(ENV_SECTION, ENV_SHOW_HIDDEN, &raw)?;
        }
        if let Some(raw) = self.var(ENV_LIST) {
            config.listing.enabled = parse_flag(ENV_SECTION, ENV_LIST, &raw)?;
        }
        if let Some(raw) = self.var(ENV_LOG_LEVEL) {
            config.logging.level = parse_level(ENV_SECTION, ENV_LOG_LEVEL, &raw)?;
        }
        if let Some(raw) = self.var(ENV_LOG_FORMAT) {
            config.logging.format = parse_log_format(ENV_SECTION, ENV_LOG_FORMAT, &raw)?;
        }
        if let Some(raw) = self.var(ENV_TELEMETRY_ENDPOINT) {
            config.telemetry_endpoint = if raw.trim().is_empty() {
                None
            } else {
                Some(parse_endpoint(ENV_SECTION, ENV_TELEMETRY_ENDPOINT, &raw)?)
            };
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ConfigLoader {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConfigLoader")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

fn read_document(path: &Path) -> ConfigResult<ConfigDocument> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::io("read", path, source))?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_document(config: &mut AppConfig, document: ConfigDocument) -> ConfigResult<()> {
    if let Some(confirm) = document.confirm {
        config.confirm = confirm;
    }
    if let Some(listing) = document.listing {
        if let Some(enabled) = listing.enabled {
            config.listing.enabled = enabled;
        }
        if let Some(show_hidden) = listing.show_hidden {
            config.listing.show_hidden = show_hidden;
        }
    }
    if let Some(logging) = document.logging {
        if let Some(level) = logging.level {
            config.logging.level = parse_level("logging", "level", &level)?;
        }
        if let Some(format) = logging.format {
            config.logging.format = parse_log_format("logging", "format", &format)?;
        }
    }
    if let Some(endpoint) = document.telemetry_endpoint {
        config.telemetry_endpoint = Some(parse_endpoint("root", "telemetry_endpoint", &endpoint)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogFormatSetting;
    use std::collections::HashMap;

    fn loader(vars: &[(&str, &str)]) -> ConfigLoader {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        ConfigLoader::with_env(move |name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() -> ConfigResult<()> {
        assert_eq!(loader(&[]).load()?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn environment_overrides_apply() -> ConfigResult<()> {
        let config = loader(&[
            (ENV_ASSUME_YES, "yes"),
            (ENV_SHOW_HIDDEN, "1"),
            (ENV_LIST, "off"),
            (ENV_LOG_LEVEL, "ascend_nav=debug"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_TELEMETRY_ENDPOINT, "http://127.0.0.1:9/events"),
        ])
        .load()?;

        assert_eq!(config.confirm, ConfirmPolicy::AssumeYes);
        assert!(config.listing.show_hidden);
        assert!(!config.listing.enabled);
        assert_eq!(config.logging.level, "ascend_nav=debug");
        assert_eq!(config.logging.format, LogFormatSetting::Json);
        assert_eq!(
            config.telemetry_endpoint.as_ref().map(url::Url::as_str),
            Some("http://127.0.0.1:9/events")
        );
        Ok(())
    }

    #[test]
    fn invalid_flag_is_rejected_with_context() {
        let result = loader(&[(ENV_SHOW_HIDDEN, "perhaps")]).load();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidField { ref field, .. }) if field == ENV_SHOW_HIDDEN
        ));
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let result = loader(&[])
            .file(Some(PathBuf::from("/nonexistent/ascend/config.json")))
            .load();
        assert!(matches!(result, Err(ConfigError::Io { operation: "read", .. })));
    }
}
