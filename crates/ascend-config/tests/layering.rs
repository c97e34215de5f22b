use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use ascend_config::{
    ConfigError, ConfigLoader, ConfirmPolicy, ENV_CONFIG, ENV_LOG_FORMAT, ENV_SHOW_HIDDEN,
    ENV_TELEMETRY_ENDPOINT, LogFormatSetting,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> anyhow::Result<PathBuf> {
    let path = dir.path().join("ascend.json");
    fs::write(&path, body)?;
    Ok(path)
}

fn env_from(pairs: Vec<(&'static str, String)>) -> ConfigLoader {
    let vars: HashMap<&'static str, String> = pairs.into_iter().collect();
    ConfigLoader::with_env(move |name| vars.get(name).cloned())
}

#[test]
fn file_overrides_defaults_and_env_overrides_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"{
            "confirm": "assume_yes",
            "listing": { "show_hidden": true },
            "logging": { "level": "warn", "format": "pretty" }
        }"#,
    )?;

    let file_only = env_from(Vec::new()).file(Some(path.clone())).load()?;
    assert_eq!(file_only.confirm, ConfirmPolicy::AssumeYes);
    assert!(file_only.listing.show_hidden);
    assert!(file_only.listing.enabled);
    assert_eq!(file_only.logging.level, "warn");
    assert_eq!(file_only.logging.format, LogFormatSetting::Pretty);

    let layered = env_from(vec![
        (ENV_SHOW_HIDDEN, "false".to_string()),
        (ENV_LOG_FORMAT, "json".to_string()),
    ])
    .file(Some(path))
    .load()?;
    assert!(!layered.listing.show_hidden);
    assert_eq!(layered.logging.format, LogFormatSetting::Json);
    assert_eq!(layered.confirm, ConfirmPolicy::AssumeYes);
    Ok(())
}

#[test]
fn config_path_is_read_from_environment() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, r#"{ "listing": { "enabled": false } }"#)?;

    let config = env_from(vec![(ENV_CONFIG, path.display().to_string())]).load()?;
    assert!(!config.listing.enabled);
    Ok(())
}

#[test]
fn unknown_fields_fail_as_json_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, r#"{ "confirm": "prompt", "theme": "dark" }"#)?;

    let result = env_from(Vec::new()).file(Some(path.clone())).load();
    let Err(ConfigError::Json { path: failed, .. }) = result else {
        anyhow::bail!("expected json error, got {result:?}");
    };
    assert_eq!(failed, path);
    Ok(())
}

#[test]
fn unknown_log_format_in_file_is_invalid_field() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, r#"{ "logging": { "format": "xml" } }"#)?;

    let result = env_from(Vec::new()).file(Some(path)).load();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidField { ref section, ref field, .. })
            if section == "logging" && field == "format"
    ));
    Ok(())
}

#[test]
fn bad_endpoint_is_rejected() {
    let result = env_from(vec![(
        ENV_TELEMETRY_ENDPOINT,
        "mailto:ops@example.com".to_string(),
    )])
    .file(None)
    .load();
    assert!(matches!(result, Err(ConfigError::InvalidField { .. })));
}
