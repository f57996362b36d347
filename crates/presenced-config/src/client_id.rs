//! Discord application (client) ID resolution.
//!
//! Lookup order: environment variable, then the config's `client_id`
//! key. Pure lookup, no side effects; when both are absent the caller
//! decides whether to prompt or abort.

use crate::schema::PresencedConfig;

/// Environment variable checked before the config file.
pub const CLIENT_ID_ENV: &str = "DISCORD_CLIENT_ID";

/// Resolve the client ID from the environment, then the config.
pub fn resolve_client_id(config: &PresencedConfig) -> Option<String> {
    resolve_from(std::env::var(CLIENT_ID_ENV).ok(), config)
}

fn resolve_from(env_value: Option<String>, config: &PresencedConfig) -> Option<String> {
    if let Some(id) = env_value {
        let id = id.trim();
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    config
        .client_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_id(id: Option<&str>) -> PresencedConfig {
        PresencedConfig {
            client_id: id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn environment_takes_precedence_over_config() {
        let config = config_with_id(Some("111"));
        let resolved = resolve_from(Some("222".into()), &config);
        assert_eq!(resolved.as_deref(), Some("222"));
    }

    #[test]
    fn falls_back_to_config_value() {
        let config = config_with_id(Some("111"));
        assert_eq!(resolve_from(None, &config).as_deref(), Some("111"));
    }

    #[test]
    fn empty_env_value_is_treated_as_unset() {
        let config = config_with_id(Some("111"));
        assert_eq!(resolve_from(Some("  ".into()), &config).as_deref(), Some("111"));
    }

    #[test]
    fn unresolved_when_both_absent() {
        let config = config_with_id(None);
        assert_eq!(resolve_from(None, &config), None);
    }

    #[test]
    fn empty_config_value_is_treated_as_unset() {
        let config = config_with_id(Some(""));
        assert_eq!(resolve_from(None, &config), None);
    }
}
