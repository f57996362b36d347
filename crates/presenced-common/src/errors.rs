use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config write error: {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("failed to connect to Discord: {0}")]
    Connect(String),

    #[error("not connected to Discord")]
    NotConnected,

    #[error("presence update failed: {0}")]
    Send(String),

    #[error("failed to close Discord connection: {0}")]
    Close(String),

    #[error("Discord {0} call timed out")]
    Timeout(&'static str),

    #[error("presence worker is gone: {0}")]
    WorkerGone(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PresencedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
