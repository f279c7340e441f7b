//! In-memory storage backend
//!
//! Used as the native backend and as the test double. Clones share the same
//! underlying map, so a test can keep a handle while the adapter owns another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::port::{StorageError, StoragePort, StorageResult};

/// Which operations should fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureMode {
    pub get: bool,
    pub set: bool,
    pub remove: bool,
}

impl FailureMode {
    pub const NONE: Self = Self {
        get: false,
        set: false,
        remove: false,
    };

    pub const ALL: Self = Self {
        get: true,
        set: true,
        remove: true,
    };
}

/// Per-key operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub gets: u32,
    /// Attempted writes, including rejected ones
    pub sets: u32,
    pub removes: u32,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    counts: HashMap<String, OpCounts>,
    failures: FailureMode,
}

#[derive(Debug, Clone)]
pub struct MemoryStorage {
    name: Rc<str>,
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
    pub fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Make subsequent operations fail according to `mode`
    pub fn set_failures(&self, mode: FailureMode) {
        self.inner.borrow_mut().failures = mode;
    }

    /// Write directly, bypassing counters and failure injection
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Read directly, bypassing counters and failure injection
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn counts(&self, key: &str) -> OpCounts {
        self.inner
            .borrow()
            .counts
            .get(key)
            .copied()
            .unwrap_or_default()
    }

    pub fn reset_counts(&self) {
        self.inner.borrow_mut().counts.clear();
    }
}

impl StoragePort for MemoryStorage {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut inner = self.inner.borrow_mut();
        inner.counts.entry(key.to_string()).or_default().gets += 1;
        if inner.failures.get {
            return Err(StorageError::Unavailable);
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.counts.entry(key.to_string()).or_default().sets += 1;
        if inner.failures.set {
            return Err(StorageError::Rejected("quota exceeded".to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.counts.entry(key.to_string()).or_default().removes += 1;
        if inner.failures.remove {
            return Err(StorageError::Unavailable);
        }
        inner.entries.remove(key);
        Ok(())
    }
}
