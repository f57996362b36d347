pub mod errors;

pub use errors::{ConfigError, PresencedError, RpcError};

pub type Result<T> = std::result::Result<T, PresencedError>;
