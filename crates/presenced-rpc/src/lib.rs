//! Discord Rich Presence adapter and update scheduler.
//!
//! [`PresenceClient`] hides the external IPC library behind a small
//! connect/update/disconnect surface and owns the connection state.
//! [`scheduler::run`] drives it on a fixed interval until a duration
//! elapses or a stop signal arrives.

pub mod client;
pub mod discord;
pub mod scheduler;
pub mod transport;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ConnectionState, PresenceClient};
pub use discord::{DiscordTransport, DEFAULT_CALL_TIMEOUT};
pub use scheduler::{RunOptions, RunSummary, StopReason};
pub use transport::PresenceTransport;
pub use update::{PresenceUpdate, UpdateOverrides};
