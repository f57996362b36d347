//! The `run` subcommand: connect and push updates until stopped.

use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Duration;

use presenced_config::{resolve_client_id, PresencedConfig, CLIENT_ID_ENV};
use presenced_rpc::{scheduler, PresenceClient, RunOptions, UpdateOverrides};
use tracing::{error, info, warn};

use crate::cli::RunArgs;

pub async fn execute(config_path: &Path, args: RunArgs) -> ExitCode {
    // First run with no config gets one written, so there is a file to edit.
    let config = presenced_config::load_or_init(config_path);

    let Some(client_id) = args.client_id.clone().or_else(|| resolve_client_id(&config)) else {
        error!("no Discord client ID found");
        println!("Set the {CLIENT_ID_ENV} environment variable, add \"client_id\"");
        println!(
            "to {}, or pass --client-id. To get your Client ID:",
            config_path.display()
        );
        println!("1. Go to https://discord.com/developers/applications");
        println!("2. Create or open an Application");
        println!("3. Copy the Application (Client) ID");
        return ExitCode::from(2);
    };

    let overrides = build_overrides(&config, &args);
    let options = RunOptions {
        duration: args.duration.map(Duration::from_secs),
        interval: None,
    };

    // Ctrl-C short-circuits the scheduler's sleep via the stop channel.
    // The sender lives inside the signal task, which outlives the run.
    let (stop_tx, stop_rx) = mpsc::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            let _ = stop_tx.send(());
        }
    });

    let result = tokio::task::spawn_blocking(move || {
        let mut client = PresenceClient::discord();
        scheduler::run(
            &mut client,
            &client_id,
            &config,
            &overrides,
            &options,
            &stop_rx,
        )
    })
    .await;

    match result {
        Ok(Ok(summary)) => {
            info!(
                updates_sent = summary.updates_sent,
                updates_failed = summary.updates_failed,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            error!("{e}");
            println!("Failed to connect to Discord. Make sure Discord is running.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("scheduler task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Explicit flags win over section fields, which win over config
/// defaults (the resolve step applies those last).
fn build_overrides(config: &PresencedConfig, args: &RunArgs) -> UpdateOverrides {
    let flags = UpdateOverrides {
        state: args.state.clone(),
        details: args.details.clone(),
        large_image: args.large_image.clone(),
        large_text: args.large_text.clone(),
        small_image: args.small_image.clone(),
        small_text: args.small_text.clone(),
        ..Default::default()
    };

    let Some(name) = args.section.as_deref() else {
        return flags;
    };
    match config.section(name) {
        Some(section) => flags.or(UpdateOverrides::from_section(&section)),
        None => {
            warn!("no '{name}' section in config, ignoring --section");
            flags
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_gaming_section() -> PresencedConfig {
        let mut config = PresencedConfig::default();
        config.sections.insert(
            "gaming".into(),
            serde_json::json!({
                "state": "section state",
                "details": "section details",
                "party_size": [2, 4]
            }),
        );
        config
    }

    #[test]
    fn flags_alone_become_overrides() {
        let args = RunArgs {
            state: Some("flag state".into()),
            ..Default::default()
        };
        let overrides = build_overrides(&PresencedConfig::default(), &args);
        assert_eq!(overrides.state.as_deref(), Some("flag state"));
        assert_eq!(overrides.details, None);
    }

    #[test]
    fn section_fields_fill_in_behind_flags() {
        let args = RunArgs {
            section: Some("gaming".into()),
            state: Some("flag state".into()),
            ..Default::default()
        };
        let overrides = build_overrides(&config_with_gaming_section(), &args);
        assert_eq!(overrides.state.as_deref(), Some("flag state"));
        assert_eq!(overrides.details.as_deref(), Some("section details"));
        assert_eq!(overrides.party_size, Some((2, 4)));
    }

    #[test]
    fn unknown_section_is_ignored() {
        let args = RunArgs {
            section: Some("missing".into()),
            details: Some("flag details".into()),
            ..Default::default()
        };
        let overrides = build_overrides(&PresencedConfig::default(), &args);
        assert_eq!(overrides.details.as_deref(), Some("flag details"));
        assert_eq!(overrides.state, None);
    }
}
