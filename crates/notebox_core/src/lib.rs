//! Core domain logic for Notebox.
//! This crate is the single source of truth for note storage invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError, DisplaySettings, Theme};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::note::{Note, DEFAULT_CATEGORY};
pub use search::content::search_notes;
pub use service::session::{NoteSession, SessionError, SessionResult};
pub use store::document::{CategoryMap, NotesDocument};
pub use store::note_store::NoteStore;
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
