//! Presence payload assembly.
//!
//! A [`PresenceUpdate`] is ephemeral: one is built per update call by
//! resolving [`UpdateOverrides`] against a config snapshot. Precedence
//! is per-field: explicit override, else the config's default, else
//! omitted. Overrides use present/absent semantics, so `Some("")` is an
//! intentional override and is not discarded.

use std::time::{SystemTime, UNIX_EPOCH};

use presenced_config::{ButtonConfig, PresencedConfig, SectionConfig};

/// The full payload sent to Discord on one update call.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceUpdate {
    pub state: String,
    pub details: String,
    pub large_image: String,
    pub large_text: String,
    /// Wall-clock Unix seconds at assembly time.
    pub start: i64,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    pub party_id: Option<String>,
    pub party_size: Option<(u32, u32)>,
    pub buttons: Vec<ButtonConfig>,
}

/// Per-field overrides layered on top of the config defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOverrides {
    pub state: Option<String>,
    pub details: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    pub party_id: Option<String>,
    pub party_size: Option<(u32, u32)>,
    pub buttons: Option<Vec<ButtonConfig>>,
}

impl UpdateOverrides {
    /// Turn a named config section into a set of overrides.
    pub fn from_section(section: &SectionConfig) -> Self {
        Self {
            state: section.state.clone(),
            details: section.details.clone(),
            large_image: section.large_image.clone(),
            large_text: section.large_text.clone(),
            small_image: section.small_image.clone(),
            small_text: section.small_text.clone(),
            party_id: None,
            party_size: section.party_size,
            buttons: section.buttons.clone(),
        }
    }

    /// Layer `self` over `fallback`: every field set here wins, every
    /// unset field falls through.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            state: self.state.or(fallback.state),
            details: self.details.or(fallback.details),
            large_image: self.large_image.or(fallback.large_image),
            large_text: self.large_text.or(fallback.large_text),
            small_image: self.small_image.or(fallback.small_image),
            small_text: self.small_text.or(fallback.small_text),
            party_id: self.party_id.or(fallback.party_id),
            party_size: self.party_size.or(fallback.party_size),
            buttons: self.buttons.or(fallback.buttons),
        }
    }

    /// Resolve against a config snapshot into a ready-to-send payload,
    /// stamping `start` with the current wall-clock time.
    pub fn resolve(&self, config: &PresencedConfig) -> PresenceUpdate {
        PresenceUpdate {
            state: self.state.clone().unwrap_or_else(|| config.state.clone()),
            details: self
                .details
                .clone()
                .unwrap_or_else(|| config.details.clone()),
            large_image: self
                .large_image
                .clone()
                .unwrap_or_else(|| config.large_image.clone()),
            large_text: self
                .large_text
                .clone()
                .unwrap_or_else(|| config.large_text.clone()),
            start: unix_now(),
            small_image: self.small_image.clone().or_else(|| config.small_image.clone()),
            small_text: self.small_text.clone().or_else(|| config.small_text.clone()),
            party_id: self.party_id.clone(),
            party_size: self.party_size,
            buttons: self.buttons.clone().unwrap_or_default(),
        }
    }
}

/// Current wall-clock time as Unix seconds.
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
