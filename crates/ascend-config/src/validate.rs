//! Parsing helpers shared by the file and environment layers.

use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::model::LogFormatSetting;

/// Interpret a flag value: `1|true|yes|on` or `0|false|no|off`, case-insensitive.
///
/// Returns `None` for anything else.
#[must_use]
pub fn flag_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_flag(section: &str, field: &str, raw: &str) -> ConfigResult<bool> {
    flag_value(raw).ok_or_else(|| {
        ConfigError::invalid_field(section, field, Some(raw), "expected a boolean flag")
    })
}

pub(crate) fn parse_log_format(
    section: &str,
    field: &str,
    raw: &str,
) -> ConfigResult<LogFormatSetting> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(LogFormatSetting::Auto),
        "pretty" => Ok(LogFormatSetting::Pretty),
        "json" => Ok(LogFormatSetting::Json),
        _ => Err(ConfigError::invalid_field(
            section,
            field,
            Some(raw),
            "expected one of auto, pretty, json",
        )),
    }
}

pub(crate) fn parse_level(section: &str, field: &str, raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid_field(
            section,
            field,
            Some(raw),
            "must not be empty",
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_field(
            section,
            field,
            Some(raw),
            "must not contain whitespace",
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_endpoint(section: &str, field: &str, raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|_| ConfigError::invalid_field(section, field, Some(raw), "must be a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_field(
            section,
            field,
            Some(raw),
            "must use http or https",
        ));
    }
    Ok(url)
}
