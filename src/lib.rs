//! Multi List Todo - named todo lists persisted in browser storage
//!
//! Core modules:
//! - `model`: List and item value types (the persisted shape)
//! - `store`: In-memory list store with immutable snapshots and change listeners
//! - `persistence`: Storage port, blob format, load/save with fallback
//! - `platform`: Browser/native storage backends
//! - `session`: Wires a store to persistence for one page session
//! - `settings`: Runtime configuration

pub mod model;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod store;

pub use model::{Item, TodoList};
pub use session::TodoSession;
pub use settings::{LogLevel, Settings};
pub use store::{ListStore, Snapshot, StoreError};

/// Application constants
pub mod consts {
    /// Storage key for the whole list blob
    pub const STORAGE_KEY: &str = "todoLists";
}
