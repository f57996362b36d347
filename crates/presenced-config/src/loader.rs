//! JSON config loading: read from a path, or degrade to defaults.

use std::path::Path;

use presenced_common::ConfigError;
use tracing::{info, warn};

use crate::schema::{PresencedConfig, DEFAULT_UPDATE_INTERVAL_SECS};

/// Config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "discord_config.json";

/// Load config from a specific JSON file path.
///
/// Deserializes using serde defaults for any missing fields. A
/// non-positive `update_interval` is corrected back to the default with
/// a warning rather than failing the load.
pub fn load_from_path(path: &Path) -> Result<PresencedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut config: PresencedConfig = serde_json::from_str(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;

    if config.update_interval == 0 {
        warn!(
            "update_interval must be positive, using default of {}s",
            DEFAULT_UPDATE_INTERVAL_SECS
        );
        config.update_interval = DEFAULT_UPDATE_INTERVAL_SECS;
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `path`, falling back to the default record.
///
/// Never fails past this boundary: a missing file, unreadable file, or
/// malformed JSON logs a warning and yields `PresencedConfig::default()`.
pub fn load_or_default(path: &Path) -> PresencedConfig {
    load_from_path(path).unwrap_or_else(|e| {
        warn!("{e} — using default config");
        PresencedConfig::default()
    })
}

/// Like [`load_or_default`], but a missing file is created with the
/// default record so first-time users get an editable config.
///
/// An existing file is never overwritten, even when it fails to parse;
/// a failed write is logged and the in-memory defaults are used anyway.
pub fn load_or_init(path: &Path) -> PresencedConfig {
    match load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            if !path.exists() {
                let config = PresencedConfig::default();
                match crate::writer::save_to_path(&config, path) {
                    Ok(()) => info!("created default config at {}", path.display()),
                    Err(write_err) => warn!("{write_err} — could not create default config"),
                }
                config
            } else {
                warn!("{e} — using default config");
                PresencedConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_nonexistent_returns_read_error() {
        let result = load_from_path(Path::new("/tmp/nonexistent_presenced_config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_invalid_json_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");
        std::fs::write(&path, "this is not valid json {{{").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_or_default_on_missing_file_is_exact_default_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");

        let config = load_or_default(&path);
        assert_eq!(config, PresencedConfig::default());
        assert_eq!(config.update_interval, 15);
    }

    #[test]
    fn load_or_default_on_malformed_file_is_exact_default_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert_eq!(load_or_default(&path), PresencedConfig::default());
    }

    #[test]
    fn load_or_init_creates_the_default_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");

        let config = load_or_init(&path);
        assert_eq!(config, PresencedConfig::default());

        // A second load reads the file it just wrote.
        assert!(path.exists());
        assert_eq!(load_from_path(&path).unwrap(), PresencedConfig::default());
    }

    #[test]
    fn load_or_init_never_overwrites_a_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");
        std::fs::write(&path, "not json at all").unwrap();

        let config = load_or_init(&path);
        assert_eq!(config, PresencedConfig::default());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "not json at all"
        );
    }

    #[test]
    fn zero_update_interval_is_corrected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");
        std::fs::write(&path, r#"{"update_interval": 0}"#).unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.update_interval, 15);
    }

    #[test]
    fn load_valid_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord_config.json");
        std::fs::write(
            &path,
            r#"{
                "state": "Hacking",
                "client_id": "123456789012345678",
                "gaming": {"state": "🎮", "party_size": [1, 4]}
            }"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.state, "Hacking");
        assert_eq!(config.client_id.as_deref(), Some("123456789012345678"));
        assert_eq!(config.details, "Enjoying Discord");
        assert_eq!(config.section("gaming").unwrap().party_size, Some((1, 4)));
    }
}
