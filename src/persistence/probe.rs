//! Startup self-test of the storage backends
//!
//! Round-trips a sentinel value under its own key so the data key is never
//! touched. Purely diagnostic: the result is logged and never changes how
//! loading or saving behaves.

use super::adapter::{Backend, PersistenceAdapter};
use super::port::{StoragePort, StorageResult};

pub const PROBE_KEY: &str = "__todo_probe__";
const PROBE_VALUE: &str = "probe-ok";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Ok,
    /// Value read back differs from what was written
    Mismatch,
    Error(String),
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeResult::Ok)
    }
}

impl std::fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeResult::Ok => write!(f, "OK"),
            ProbeResult::Mismatch => write!(f, "FAIL"),
            ProbeResult::Error(reason) => write!(f, "ERROR ({})", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub primary: ProbeResult,
    pub secondary: ProbeResult,
}

impl ProbeReport {
    pub fn get(&self, which: Backend) -> &ProbeResult {
        match which {
            Backend::Primary => &self.primary,
            Backend::Secondary => &self.secondary,
        }
    }
}

pub fn probe_backend(backend: &dyn StoragePort) -> ProbeResult {
    let round_trip = || -> StorageResult<Option<String>> {
        backend.set(PROBE_KEY, PROBE_VALUE)?;
        let read = backend.get(PROBE_KEY)?;
        backend.remove(PROBE_KEY)?;
        Ok(read)
    };

    match round_trip() {
        Ok(Some(value)) if value == PROBE_VALUE => ProbeResult::Ok,
        Ok(_) => ProbeResult::Mismatch,
        Err(e) => ProbeResult::Error(e.to_string()),
    }
}

/// Probe both backends of `adapter` and log a one-line summary
pub fn probe(adapter: &PersistenceAdapter) -> ProbeReport {
    let report = ProbeReport {
        primary: probe_backend(adapter.backend(Backend::Primary)),
        secondary: probe_backend(adapter.backend(Backend::Secondary)),
    };
    log::info!(
        "Storage test: {}: {}, {}: {}",
        adapter.backend(Backend::Primary).name(),
        report.primary,
        adapter.backend(Backend::Secondary).name(),
        report.secondary
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FailureMode, MemoryStorage};

    #[test]
    fn test_healthy_backend_passes_and_leaves_no_trace() {
        let mem = MemoryStorage::new("mem");
        assert_eq!(probe_backend(&mem), ProbeResult::Ok);
        assert!(!mem.contains(PROBE_KEY));
    }

    #[test]
    fn test_failing_backend_reports_error() {
        let mem = MemoryStorage::new("mem");
        mem.set_failures(FailureMode { set: true, ..FailureMode::NONE });
        let result = probe_backend(&mem);
        assert!(matches!(result, ProbeResult::Error(_)));
        assert_eq!(result.to_string(), "ERROR (storage operation rejected: quota exceeded)");
    }

    #[test]
    fn test_probe_does_not_touch_data_key() {
        let p = MemoryStorage::new("local");
        let s = MemoryStorage::new("session");
        s.set_failures(FailureMode::ALL);
        p.seed("todoLists", "[]");
        let adapter =
            PersistenceAdapter::new(Box::new(p.clone()), Box::new(s.clone()), "todoLists");
        let report = probe(&adapter);
        assert!(report.get(Backend::Primary).is_ok());
        assert!(!report.get(Backend::Secondary).is_ok());
        assert_eq!(p.counts("todoLists"), Default::default());
        assert_eq!(p.peek("todoLists").as_deref(), Some("[]"));
    }
}
