//! Production transport over the `discord-rich-presence` crate.
//!
//! The external library is blocking and places no deadline on its own
//! socket calls, so the `DiscordIpcClient` lives on a dedicated worker
//! thread. The facade sends it commands over a channel and bounds every
//! reply wait; a stalled Discord client surfaces as [`RpcError::Timeout`]
//! instead of hanging the process.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use discord_rich_presence::activity::{Activity, Assets, Button, Party, Timestamps};
use discord_rich_presence::{DiscordIpc, DiscordIpcClient};
use presenced_common::RpcError;
use tracing::debug;

use crate::transport::PresenceTransport;
use crate::update::PresenceUpdate;

/// Upper bound on any single IPC call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

enum WorkerOp {
    Open { client_id: String },
    Send { update: PresenceUpdate },
    Close,
}

/// One request to the worker. The sequence number correlates each reply
/// with the call that issued it; a call that times out leaves its late
/// reply in the channel, and the number is what lets the next call
/// recognize and discard it instead of claiming it as its own.
struct WorkerRequest {
    seq: u64,
    op: WorkerOp,
}

struct WorkerReply {
    seq: u64,
    result: Result<(), String>,
}

enum CallOutcome {
    Done,
    Failed(String),
    TimedOut,
    WorkerGone,
}

/// Facade half of the worker pair; implements [`PresenceTransport`].
pub struct DiscordTransport {
    request_tx: Sender<WorkerRequest>,
    reply_rx: Receiver<WorkerReply>,
    call_timeout: Duration,
    seq: u64,
}

impl DiscordTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(call_timeout: Duration) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        thread::spawn(move || worker_loop(request_rx, reply_tx));
        Self {
            request_tx,
            reply_rx,
            call_timeout,
            seq: 0,
        }
    }

    fn call(&mut self, op: WorkerOp) -> CallOutcome {
        self.seq += 1;
        let seq = self.seq;
        if self.request_tx.send(WorkerRequest { seq, op }).is_err() {
            return CallOutcome::WorkerGone;
        }
        let deadline = Instant::now() + self.call_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.reply_rx.recv_timeout(remaining) {
                Ok(reply) if reply.seq < seq => {
                    debug!(reply.seq, "discarding stale reply from a timed-out call");
                }
                Ok(reply) => {
                    return match reply.result {
                        Ok(()) => CallOutcome::Done,
                        Err(reason) => CallOutcome::Failed(reason),
                    };
                }
                Err(RecvTimeoutError::Timeout) => return CallOutcome::TimedOut,
                Err(RecvTimeoutError::Disconnected) => return CallOutcome::WorkerGone,
            }
        }
    }
}

impl Default for DiscordTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceTransport for DiscordTransport {
    fn open(&mut self, client_id: &str) -> Result<(), RpcError> {
        match self.call(WorkerOp::Open {
            client_id: client_id.to_string(),
        }) {
            CallOutcome::Done => Ok(()),
            CallOutcome::Failed(reason) => Err(RpcError::Connect(reason)),
            CallOutcome::TimedOut => Err(RpcError::Timeout("connect")),
            CallOutcome::WorkerGone => Err(RpcError::WorkerGone("IPC worker exited".into())),
        }
    }

    fn send(&mut self, update: &PresenceUpdate) -> Result<(), RpcError> {
        match self.call(WorkerOp::Send {
            update: update.clone(),
        }) {
            CallOutcome::Done => Ok(()),
            CallOutcome::Failed(reason) => Err(RpcError::Send(reason)),
            CallOutcome::TimedOut => Err(RpcError::Timeout("update")),
            CallOutcome::WorkerGone => Err(RpcError::WorkerGone("IPC worker exited".into())),
        }
    }

    fn close(&mut self) -> Result<(), RpcError> {
        match self.call(WorkerOp::Close) {
            CallOutcome::Done => Ok(()),
            CallOutcome::Failed(reason) => Err(RpcError::Close(reason)),
            CallOutcome::TimedOut => Err(RpcError::Timeout("close")),
            CallOutcome::WorkerGone => Err(RpcError::WorkerGone("IPC worker exited".into())),
        }
    }
}

/// Worker half: owns the blocking `DiscordIpcClient` for its lifetime.
///
/// Errors from the library are stringified here because its error type
/// cannot cross threads.
fn worker_loop(request_rx: Receiver<WorkerRequest>, reply_tx: Sender<WorkerReply>) {
    let mut client: Option<DiscordIpcClient> = None;

    while let Ok(request) = request_rx.recv() {
        let result = match request.op {
            WorkerOp::Open { client_id } => open_client(&mut client, &client_id),
            WorkerOp::Send { update } => send_update(&mut client, &update),
            WorkerOp::Close => close_client(&mut client),
        };
        let reply = WorkerReply {
            seq: request.seq,
            result,
        };
        if reply_tx.send(reply).is_err() {
            break;
        }
    }

    // Facade dropped; best-effort close of any live handle.
    if let Some(mut c) = client.take() {
        let _ = c.close();
    }
    debug!("discord IPC worker exiting");
}

fn open_client(slot: &mut Option<DiscordIpcClient>, client_id: &str) -> Result<(), String> {
    let mut client = DiscordIpcClient::new(client_id).map_err(|e| e.to_string())?;
    client.connect().map_err(|e| e.to_string())?;
    *slot = Some(client);
    Ok(())
}

fn send_update(slot: &mut Option<DiscordIpcClient>, update: &PresenceUpdate) -> Result<(), String> {
    let client = slot.as_mut().ok_or_else(|| "connection not open".to_string())?;
    client
        .set_activity(build_activity(update))
        .map_err(|e| e.to_string())
}

fn close_client(slot: &mut Option<DiscordIpcClient>) -> Result<(), String> {
    match slot.take() {
        Some(mut client) => client.close().map_err(|e| e.to_string()),
        None => Ok(()),
    }
}

fn build_activity(update: &PresenceUpdate) -> Activity<'_> {
    let mut assets = Assets::new()
        .large_image(&update.large_image)
        .large_text(&update.large_text);
    if let Some(image) = &update.small_image {
        assets = assets.small_image(image);
    }
    if let Some(text) = &update.small_text {
        assets = assets.small_text(text);
    }

    let mut activity = Activity::new()
        .state(&update.state)
        .details(&update.details)
        .assets(assets)
        .timestamps(Timestamps::new().start(update.start));

    if update.party_id.is_some() || update.party_size.is_some() {
        let mut party = Party::new();
        if let Some(id) = &update.party_id {
            party = party.id(id);
        }
        if let Some((current, max)) = update.party_size {
            party = party.size([current as i32, max as i32]);
        }
        activity = activity.party(party);
    }

    if !update.buttons.is_empty() {
        activity = activity.buttons(
            update
                .buttons
                .iter()
                .map(|b| Button::new(&b.label, &b.url))
                .collect(),
        );
    }

    activity
}
