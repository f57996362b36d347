//! Fixed-interval update loop.
//!
//! Single logical thread of control: connect, one immediate update, then
//! sleep-and-update until the duration budget runs out or the stop
//! channel fires. The sleep is the stop channel's `recv_timeout`, so a
//! stop delivered mid-interval ends the run without waiting out the
//! tick.
//!
//! The config is a snapshot: each tick re-merges from the same in-memory
//! value (fresh `start` timestamp per update) and never re-reads the
//! disk, matching the original behavior.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use presenced_common::RpcError;
use presenced_config::PresencedConfig;
use tracing::info;

use crate::client::PresenceClient;
use crate::update::UpdateOverrides;

/// Caller knobs for one scheduler run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Total run budget. `None` runs until stopped; zero means exactly
    /// the one immediate update.
    pub duration: Option<Duration>,
    /// Tick interval override; `None` uses the config's
    /// `update_interval`.
    pub interval: Option<Duration>,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DurationElapsed,
    Interrupted,
}

/// Tally of one completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub updates_sent: u32,
    pub updates_failed: u32,
    pub stopped: StopReason,
}

/// Connect and push updates until the duration elapses or `stop` fires.
///
/// A connect failure is fatal: the error is returned before any update
/// and the client never left Disconnected. Once the loop is entered,
/// failed updates are counted and the loop continues; `disconnect` runs
/// exactly once on every exit path. Closing the `stop` channel counts as
/// a stop request, so callers must keep the sender alive for the
/// intended run length.
pub fn run(
    client: &mut PresenceClient,
    client_id: &str,
    config: &PresencedConfig,
    overrides: &UpdateOverrides,
    options: &RunOptions,
    stop: &Receiver<()>,
) -> Result<RunSummary, RpcError> {
    client.connect(client_id)?;

    let interval = options.interval.unwrap_or_else(|| config.interval());
    let started = Instant::now();
    let mut sent = 0u32;
    let mut failed = 0u32;

    info!(
        interval_secs = interval.as_secs_f64(),
        duration = ?options.duration,
        "presence scheduler running"
    );

    tick(client, config, overrides, &mut sent, &mut failed);

    let stopped = loop {
        if let Some(total) = options.duration {
            if started.elapsed() >= total {
                break StopReason::DurationElapsed;
            }
        }
        match stop.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break StopReason::Interrupted,
            Err(RecvTimeoutError::Timeout) => {
                tick(client, config, overrides, &mut sent, &mut failed)
            }
        }
    };

    client.disconnect();

    info!(
        ?stopped,
        updates_sent = sent,
        updates_failed = failed,
        "presence scheduler stopped"
    );
    Ok(RunSummary {
        updates_sent: sent,
        updates_failed: failed,
        stopped,
    })
}

/// One update attempt. Failures are already logged by the client; they
/// only affect the tally here.
fn tick(
    client: &mut PresenceClient,
    config: &PresencedConfig,
    overrides: &UpdateOverrides,
    sent: &mut u32,
    failed: &mut u32,
) {
    let update = overrides.resolve(config);
    match client.update(&update) {
        Ok(()) => {
            *sent += 1;
            info!(state = %update.state, "status updated");
        }
        Err(_) => *failed += 1,
    }
}
