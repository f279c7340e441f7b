//! Platform storage backends
//!
//! Browser: `localStorage` is primary, `sessionStorage` the fallback.
//! Native: both are in-memory, so nothing outlives the process.

use crate::persistence::StoragePort;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{StorageError, StoragePort, StorageResult};
    use wasm_bindgen::JsValue;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum WebStorageKind {
        Local,
        Session,
    }

    /// A `window.localStorage` / `window.sessionStorage` binding.
    ///
    /// The `Storage` object is looked up on every call; browsers may throw
    /// on access itself (e.g. storage disabled), which maps to `Unavailable`.
    #[derive(Debug, Clone, Copy)]
    pub struct WebStorage {
        kind: WebStorageKind,
    }

    impl WebStorage {
        pub fn new(kind: WebStorageKind) -> Self {
            Self { kind }
        }

        fn storage(&self) -> StorageResult<web_sys::Storage> {
            let window = web_sys::window().ok_or(StorageError::Unavailable)?;
            let storage = match self.kind {
                WebStorageKind::Local => window.local_storage(),
                WebStorageKind::Session => window.session_storage(),
            };
            storage
                .map_err(|_| StorageError::Unavailable)?
                .ok_or(StorageError::Unavailable)
        }
    }

    fn rejected(err: JsValue) -> StorageError {
        let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{:?}", err));
        StorageError::Rejected(message)
    }

    impl StoragePort for WebStorage {
        fn name(&self) -> &str {
            match self.kind {
                WebStorageKind::Local => "localStorage",
                WebStorageKind::Session => "sessionStorage",
            }
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.storage()?.get_item(key).map_err(rejected)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.storage()?.set_item(key, value).map_err(rejected)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.storage()?.remove_item(key).map_err(rejected)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebStorage, WebStorageKind};

/// Primary and secondary backends for this platform
#[cfg(target_arch = "wasm32")]
pub fn backends() -> (Box<dyn StoragePort>, Box<dyn StoragePort>) {
    (
        Box::new(WebStorage::new(WebStorageKind::Local)),
        Box::new(WebStorage::new(WebStorageKind::Session)),
    )
}

/// Native stub: two independent in-memory maps
#[cfg(not(target_arch = "wasm32"))]
pub fn backends() -> (Box<dyn StoragePort>, Box<dyn StoragePort>) {
    use crate::persistence::MemoryStorage;
    (
        Box::new(MemoryStorage::new("memory-primary")),
        Box::new(MemoryStorage::new("memory-secondary")),
    )
}
