//! presenced configuration system.
//!
//! JSON-based configuration with serde defaults so partial config files
//! work out of the box. The whole file is rewritten on save; named
//! "section" sub-objects and unrecognized keys are kept raw so they
//! survive a load/save round trip untouched.

pub mod client_id;
pub mod loader;
pub mod schema;
pub mod writer;

// Re-export core types for convenience
pub use client_id::{resolve_client_id, CLIENT_ID_ENV};
pub use loader::{load_from_path, load_or_default, load_or_init, DEFAULT_CONFIG_FILE};
pub use schema::{ButtonConfig, PresencedConfig, SectionConfig, DEFAULT_UPDATE_INTERVAL_SECS};
pub use writer::save_to_path;
