//! The `examples` subcommand: a tour of canned and config-driven
//! payloads through the same update call the scheduler uses.

use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use presenced_config::{load_or_default, resolve_client_id, PresencedConfig, CLIENT_ID_ENV};
use presenced_rpc::{PresenceClient, UpdateOverrides};
use tracing::{error, info};

use crate::cli::ExamplesArgs;
use crate::prompt::{print_header, read_line};

/// Order sections are played in when running everything from config.
const KNOWN_SECTIONS: [&str; 5] = ["gaming", "watching", "listening", "custom", "multiplayer"];

/// Seconds each example payload stays up.
const DEFAULT_DWELL_SECS: u64 = 5;

pub async fn execute(config_path: &Path, args: ExamplesArgs) -> ExitCode {
    let config = load_or_default(config_path);

    let Some(client_id) = resolve_client_id(&config).or_else(prompt_for_client_id) else {
        println!("✗ No Client ID provided. Aborting.");
        return ExitCode::from(2);
    };

    // Ctrl-C feeds the stop channel only on the non-interactive path.
    // The menus block on stdin, where a queued stop would sit unread
    // until the next dwell; leaving SIGINT at its default there lets
    // Ctrl-C end the process at a prompt.
    let (stop_tx, stop_rx) = mpsc::channel();
    let _stop_keepalive = if args.section.is_some() {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping");
                let _ = stop_tx.send(());
            }
        });
        None
    } else {
        // The dwell loop reads a vanished sender as a stop request, so
        // the sender has to outlive the run.
        Some(stop_tx)
    };

    let section = args.section;
    let result = tokio::task::spawn_blocking(move || {
        run_examples(&config, &client_id, section.as_deref(), &stop_rx)
    })
    .await;

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("examples task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_for_client_id() -> Option<String> {
    println!("\nNo Discord Client ID found in environment or config.");
    let id = read_line("Enter your Discord Application ID (Client ID): ")?;
    if id.is_empty() {
        return None;
    }
    if let Some(answer) = read_line("Save this ID to a local .env file for next time? [y/N]: ") {
        if answer.eq_ignore_ascii_case("y") {
            match std::fs::write(".env", format!("{CLIENT_ID_ENV}={id}\n")) {
                Ok(()) => println!("✓ Saved Client ID to .env"),
                Err(e) => println!("✗ Failed to save .env: {e}"),
            }
        }
    }
    Some(id)
}

fn run_examples(
    config: &PresencedConfig,
    client_id: &str,
    section: Option<&str>,
    stop: &Receiver<()>,
) -> ExitCode {
    let mut client = PresenceClient::discord();
    if client.connect(client_id).is_err() {
        println!("Failed to connect to Discord. Make sure Discord is running.");
        return ExitCode::FAILURE;
    }

    if let Some(name) = section {
        show_section(&mut client, config, name, stop);
    } else {
        menu(&mut client, config, stop);
    }

    client.disconnect();
    println!("\n✓ Done.");
    ExitCode::SUCCESS
}

fn menu(client: &mut PresenceClient, config: &PresencedConfig, stop: &Receiver<()>) {
    print_header("Discord Status - Choose Mode");
    println!("1) Run built-in presets");
    println!("2) Run sections from the config file");
    println!("3) Run a single section by name");
    println!("4) Exit");

    match read_line("\nChoose an option (1-4): ").as_deref() {
        Some("1") => {
            for (label, overrides) in presets() {
                if !show(client, config, label, &overrides, DEFAULT_DWELL_SECS, stop) {
                    break;
                }
            }
        }
        Some("2") => {
            for name in KNOWN_SECTIONS {
                if !show_section(client, config, name, stop) {
                    break;
                }
            }
        }
        Some("3") => {
            if let Some(name) = read_line("Enter section name (e.g. gaming): ") {
                if name.is_empty() {
                    println!("No section name provided.");
                } else {
                    show_section(client, config, &name, stop);
                }
            }
        }
        _ => println!("Exiting without changes."),
    }
}

/// The hardcoded payloads the original shipped with.
fn presets() -> Vec<(&'static str, UpdateOverrides)> {
    vec![
        (
            "Gaming",
            UpdateOverrides {
                state: Some("🎮 Playing Elden Ring".into()),
                details: Some("Exploring the Lands Between".into()),
                large_text: Some("Elden Ring".into()),
                ..Default::default()
            },
        ),
        (
            "Watching",
            UpdateOverrides {
                state: Some("👀 Watching".into()),
                details: Some("Twitch Streamer123".into()),
                large_text: Some("On Twitch".into()),
                ..Default::default()
            },
        ),
        (
            "Listening",
            UpdateOverrides {
                state: Some("🎵 Listening to".into()),
                details: Some("Lofi Hip Hop Beats".into()),
                large_text: Some("Spotify".into()),
                ..Default::default()
            },
        ),
        (
            "Custom",
            UpdateOverrides {
                state: Some("💻 Working on a Project".into()),
                details: Some("Discord Bot Development".into()),
                large_text: Some("Coding".into()),
                ..Default::default()
            },
        ),
        (
            "Multiplayer",
            UpdateOverrides {
                state: Some("🎮 Playing Valorant".into()),
                details: Some("In Competitive Match".into()),
                large_text: Some("Valorant - Competitive".into()),
                party_size: Some((4, 5)),
                ..Default::default()
            },
        ),
    ]
}

/// Push one payload and dwell on it. Returns false when a stop request
/// arrived during the dwell.
fn show(
    client: &mut PresenceClient,
    config: &PresencedConfig,
    label: &str,
    overrides: &UpdateOverrides,
    dwell_secs: u64,
    stop: &Receiver<()>,
) -> bool {
    println!("\n--- {label} ---");
    let update = overrides.resolve(config);
    if client.update(&update).is_ok() {
        info!(state = %update.state, "example status updated");
    }
    dwell(stop, dwell_secs)
}

/// Missing sections are skipped (returns true) so a partial config
/// doesn't cut the tour short.
fn show_section(
    client: &mut PresenceClient,
    config: &PresencedConfig,
    name: &str,
    stop: &Receiver<()>,
) -> bool {
    let Some(section) = config.section(name) else {
        println!("⚠ No '{name}' section in config; skipping.");
        return true;
    };
    let dwell_secs = section.duration.unwrap_or(DEFAULT_DWELL_SECS);
    show(
        client,
        config,
        name,
        &UpdateOverrides::from_section(&section),
        dwell_secs,
        stop,
    )
}

fn dwell(stop: &Receiver<()>, secs: u64) -> bool {
    matches!(
        stop.recv_timeout(Duration::from_secs(secs)),
        Err(RecvTimeoutError::Timeout)
    )
}
