//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the documented defaults.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default seconds between presence updates.
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 15;

/// Root configuration, stored as one flat JSON object on disk.
///
/// Only override what you want to change; every recognized field has a
/// default. Any other top-level key is treated as a named presence
/// section (see [`SectionConfig`]) and kept raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresencedConfig {
    pub state: String,
    pub details: String,
    pub large_image: String,
    pub large_text: String,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    /// Seconds between updates. Must be positive; the loader corrects
    /// zero back to the default with a warning.
    pub update_interval: u64,
    /// Discord application ID. The `DISCORD_CLIENT_ID` environment
    /// variable takes precedence over this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Named presence sections plus any unrecognized top-level keys,
    /// kept as raw JSON so saves round-trip them unchanged.
    #[serde(flatten)]
    pub sections: BTreeMap<String, serde_json::Value>,
}

impl Default for PresencedConfig {
    fn default() -> Self {
        Self {
            state: "Playing a game".to_string(),
            details: "Enjoying Discord".to_string(),
            large_image: "discord".to_string(),
            large_text: "Discord Rich Presence".to_string(),
            small_image: None,
            small_text: None,
            update_interval: DEFAULT_UPDATE_INTERVAL_SECS,
            client_id: None,
            sections: BTreeMap::new(),
        }
    }
}

impl PresencedConfig {
    /// Interval between scheduled updates.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    /// Look up and interpret a named section.
    ///
    /// Returns `None` when the section is missing or malformed; a
    /// malformed section logs a warning instead of failing the caller.
    pub fn section(&self, name: &str) -> Option<SectionConfig> {
        let value = self.sections.get(name)?;
        if !value.is_object() {
            warn!("config section '{name}' is not an object, ignoring");
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(section) => Some(section),
            Err(e) => {
                warn!("config section '{name}' is malformed: {e}");
                None
            }
        }
    }
}

/// One named presence section: a complete alternate field set,
/// selectable by name (e.g. `"gaming"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub state: Option<String>,
    pub details: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    /// Party fill as `(current, max)`, serialized as a two-element array.
    pub party_size: Option<(u32, u32)>,
    /// Discord displays at most two buttons; not enforced here.
    pub buttons: Option<Vec<ButtonConfig>>,
    /// Seconds the examples runner dwells on this section.
    pub duration: Option<u64>,
}

/// A clickable presence button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_record() {
        let config = PresencedConfig::default();
        assert_eq!(config.state, "Playing a game");
        assert_eq!(config.details, "Enjoying Discord");
        assert_eq!(config.large_image, "discord");
        assert_eq!(config.large_text, "Discord Rich Presence");
        assert_eq!(config.small_image, None);
        assert_eq!(config.small_text, None);
        assert_eq!(config.update_interval, 15);
        assert_eq!(config.client_id, None);
        assert!(config.sections.is_empty());
    }

    #[test]
    fn interval_comes_from_update_interval() {
        let config = PresencedConfig {
            update_interval: 3,
            ..Default::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(3));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PresencedConfig =
            serde_json::from_str(r#"{"state": "Idle", "update_interval": 30}"#).unwrap();
        assert_eq!(config.state, "Idle");
        assert_eq!(config.update_interval, 30);
        assert_eq!(config.details, "Enjoying Discord");
        assert_eq!(config.large_image, "discord");
    }

    #[test]
    fn section_parses_full_field_set() {
        let config: PresencedConfig = serde_json::from_str(
            r#"{
                "gaming": {
                    "state": "🎮 Playing Valorant",
                    "details": "In Competitive Match",
                    "party_size": [4, 5],
                    "buttons": [{"label": "Join", "url": "https://example.com"}],
                    "duration": 10
                }
            }"#,
        )
        .unwrap();

        let section = config.section("gaming").unwrap();
        assert_eq!(section.state.as_deref(), Some("🎮 Playing Valorant"));
        assert_eq!(section.details.as_deref(), Some("In Competitive Match"));
        assert_eq!(section.party_size, Some((4, 5)));
        assert_eq!(
            section.buttons,
            Some(vec![ButtonConfig {
                label: "Join".into(),
                url: "https://example.com".into(),
            }])
        );
        assert_eq!(section.duration, Some(10));
        assert_eq!(section.large_image, None);
    }

    #[test]
    fn missing_section_is_none() {
        let config = PresencedConfig::default();
        assert!(config.section("gaming").is_none());
    }

    #[test]
    fn non_object_section_is_none() {
        let config: PresencedConfig = serde_json::from_str(r#"{"auto_start": true}"#).unwrap();
        assert!(config.section("auto_start").is_none());
    }

    #[test]
    fn malformed_section_is_none() {
        let config: PresencedConfig =
            serde_json::from_str(r#"{"gaming": {"party_size": "not a pair"}}"#).unwrap();
        assert!(config.section("gaming").is_none());
    }

    #[test]
    fn unknown_keys_round_trip_through_json() {
        let input = r#"{"state": "Idle", "auto_start": true, "gaming": {"state": "go"}}"#;
        let config: PresencedConfig = serde_json::from_str(input).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let reparsed: PresencedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, reparsed);
        assert_eq!(
            reparsed.sections.get("auto_start"),
            Some(&serde_json::Value::Bool(true))
        );
        assert_eq!(reparsed.section("gaming").unwrap().state.as_deref(), Some("go"));
    }
}
