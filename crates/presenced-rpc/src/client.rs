//! Presence client: owns the transport and the connection state.

use presenced_common::RpcError;
use tracing::{info, warn};

use crate::transport::PresenceTransport;
use crate::update::PresenceUpdate;

/// Connection lifecycle state, owned exclusively by [`PresenceClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Thin adapter over one local presence connection.
///
/// At most one update is in flight per call; callers serialize. Errors
/// carry a reason (connect refused vs. timeout vs. send failure) so the
/// scheduler and CLI can tell them apart.
pub struct PresenceClient {
    transport: Box<dyn PresenceTransport>,
    state: ConnectionState,
}

impl PresenceClient {
    pub fn new(transport: Box<dyn PresenceTransport>) -> Self {
        Self {
            transport,
            state: ConnectionState::Disconnected,
        }
    }

    /// Client backed by the real Discord IPC transport.
    pub fn discord() -> Self {
        Self::new(Box::new(crate::discord::DiscordTransport::new()))
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Establish the connection. Failures are logged and returned with
    /// their reason; the state stays Disconnected.
    pub fn connect(&mut self, client_id: &str) -> Result<(), RpcError> {
        match self.transport.open(client_id) {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                info!("connected to Discord");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                warn!("{e}");
                Err(e)
            }
        }
    }

    /// Close the connection. Idempotent: a no-op when already
    /// Disconnected. Close-time transport errors are logged, not
    /// propagated; the state always ends Disconnected.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        if let Err(e) = self.transport.close() {
            warn!("{e}");
        }
        self.state = ConnectionState::Disconnected;
        info!("disconnected from Discord");
    }

    /// Send one presence payload. Fails fast with no transport call when
    /// Disconnected; otherwise a single attempt, no retry.
    pub fn update(&mut self, update: &PresenceUpdate) -> Result<(), RpcError> {
        if self.state == ConnectionState::Disconnected {
            return Err(RpcError::NotConnected);
        }
        match self.transport.send(update) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }
}
