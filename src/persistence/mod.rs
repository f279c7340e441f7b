//! Durable storage of the list store
//!
//! Features:
//! - Storage port abstraction over key-value backends
//! - Primary backend with automatic fallback to a secondary
//! - Single JSON blob under one key, cleared when there are no lists
//! - Explicit loading/ready phase so a load never writes itself back
//! - Startup backend self-test

pub mod adapter;
pub mod blob;
pub mod memory;
pub mod port;
pub mod probe;

pub use adapter::{Backend, LoadSource, Loaded, Phase, PersistenceAdapter, SaveOutcome};
pub use blob::BlobError;
pub use memory::{FailureMode, MemoryStorage, OpCounts};
pub use port::{StorageError, StoragePort, StorageResult};
pub use probe::{ProbeReport, ProbeResult};
