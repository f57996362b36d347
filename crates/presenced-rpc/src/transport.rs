//! Transport seam between the client and the external IPC library.

use presenced_common::RpcError;

use crate::update::PresenceUpdate;

/// The three operations the external presence service is treated as
/// providing. Production code uses [`crate::DiscordTransport`]; tests
/// substitute a counting fake.
pub trait PresenceTransport: Send {
    /// Establish the local connection for the given application ID.
    fn open(&mut self, client_id: &str) -> Result<(), RpcError>;

    /// Push one presence payload. Single attempt, no retry.
    fn send(&mut self, update: &PresenceUpdate) -> Result<(), RpcError>;

    /// Close the underlying handle.
    fn close(&mut self) -> Result<(), RpcError>;
}
