//! Write the config back to disk as pretty-printed JSON.
//!
//! Each save rewrites the whole file. Writes go to a `.tmp` file first
//! and are renamed into place so a crash mid-write cannot corrupt the
//! config.

use std::path::Path;

use presenced_common::ConfigError;
use tracing::{info, warn};

use crate::schema::PresencedConfig;

/// Write config to a specific path.
///
/// Creates parent directories if they don't exist. Uses atomic write
/// (write to `.tmp` file, then rename) to prevent partial writes.
pub fn save_to_path(config: &PresencedConfig, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::Parse(format!("failed to serialize config: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(|e| ConfigError::Write {
        path: tmp_path.clone(),
        reason: e.to_string(),
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename failed — try direct write as fallback (Windows compat)
        warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, &json).map_err(|e2| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e2.to_string(),
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    info!("configuration saved to {}", path.display());
    Ok(())
}
