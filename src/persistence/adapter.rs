//! Load/save bridge between the list store and two storage backends
//!
//! The primary backend is always tried first; the secondary is the fallback
//! for both reads and writes. No storage or parse failure escapes this type:
//! the worst case is an in-memory-only session.
//!
//! Saving is gated by an explicit phase. The adapter starts in
//! [`Phase::Loading`] and only moves to [`Phase::Ready`] once the caller has
//! finished applying the loaded state, so populating the store from storage
//! never writes back.

use crate::model::TodoList;

use super::blob;
use super::port::StoragePort;

/// Which of the two backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Primary,
    Secondary,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Primary => "primary",
            Backend::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Startup load in progress, change notifications are ignored
    Loading,
    /// Every change notification is saved
    Ready,
}

/// Where the loaded lists came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Backend(Backend),
    /// Neither backend had usable data
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub lists: Vec<TodoList>,
    pub source: LoadSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Still loading; nothing written
    Skipped,
    Saved(Backend),
    /// Both backends rejected the write
    Unpersisted,
    /// No lists; key removed from both backends
    Cleared,
}

pub struct PersistenceAdapter {
    primary: Box<dyn StoragePort>,
    secondary: Box<dyn StoragePort>,
    key: String,
    phase: Phase,
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .field("key", &self.key)
            .field("phase", &self.phase)
            .finish()
    }
}

impl PersistenceAdapter {
    pub fn new(
        primary: Box<dyn StoragePort>,
        secondary: Box<dyn StoragePort>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            secondary,
            key: key.into(),
            phase: Phase::Loading,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn backend(&self, which: Backend) -> &dyn StoragePort {
        match which {
            Backend::Primary => self.primary.as_ref(),
            Backend::Secondary => self.secondary.as_ref(),
        }
    }

    /// Read the persisted lists, falling back to the secondary backend.
    ///
    /// Absent, unreadable, unparsable and non-array data all count as
    /// "nothing here". Does not change the phase.
    pub fn load(&self) -> Loaded {
        for which in [Backend::Primary, Backend::Secondary] {
            if let Some(lists) = self.read_from(which) {
                log::info!(
                    "Loaded {} lists from {} storage ({})",
                    lists.len(),
                    which.as_str(),
                    self.backend(which).name()
                );
                return Loaded {
                    lists,
                    source: LoadSource::Backend(which),
                };
            }
        }

        log::info!("No valid data found in any storage");
        Loaded {
            lists: Vec::new(),
            source: LoadSource::Empty,
        }
    }

    /// Loading is over; from now on changes are saved
    pub fn mark_ready(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::Ready;
            log::info!("Initial load complete, saving enabled");
        }
    }

    /// Change notification from the store
    pub fn on_change(&mut self, lists: &[TodoList]) -> SaveOutcome {
        match self.phase {
            Phase::Loading => {
                log::debug!("Skipping save during initial load");
                SaveOutcome::Skipped
            }
            Phase::Ready => self.save(lists),
        }
    }

    /// Write `lists` regardless of phase.
    ///
    /// An empty sequence removes the key from both backends instead of
    /// persisting `[]`.
    pub fn save(&self, lists: &[TodoList]) -> SaveOutcome {
        if lists.is_empty() {
            self.clear();
            return SaveOutcome::Cleared;
        }

        let text = match blob::encode(lists) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to encode lists: {}", e);
                return SaveOutcome::Unpersisted;
            }
        };

        for which in [Backend::Primary, Backend::Secondary] {
            let backend = self.backend(which);
            match backend.set(&self.key, &text) {
                Ok(()) => {
                    log::debug!(
                        "Saved {} lists ({} bytes) to {}",
                        lists.len(),
                        text.len(),
                        backend.name()
                    );
                    return SaveOutcome::Saved(which);
                }
                Err(e) => log::warn!("{} save failed: {}", backend.name(), e),
            }
        }

        log::error!("All storage backends rejected the save; changes are in memory only");
        SaveOutcome::Unpersisted
    }

    fn clear(&self) {
        for which in [Backend::Primary, Backend::Secondary] {
            let backend = self.backend(which);
            if let Err(e) = backend.remove(&self.key) {
                log::warn!("Failed to clear {}: {}", backend.name(), e);
            }
        }
        log::info!("No lists, storage cleared");
    }

    fn read_from(&self, which: Backend) -> Option<Vec<TodoList>> {
        let backend = self.backend(which);
        let text = match backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::info!("No data found in {}", backend.name());
                return None;
            }
            Err(e) => {
                log::warn!("Error loading from {}: {}", backend.name(), e);
                return None;
            }
        };

        match blob::decode(&text) {
            Ok(lists) => Some(lists),
            Err(e) => {
                log::warn!("Ignoring data in {}: {}", backend.name(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use crate::persistence::{FailureMode, MemoryStorage};
    use proptest::prelude::*;

    const KEY: &str = "todoLists";

    fn backends() -> (MemoryStorage, MemoryStorage) {
        (MemoryStorage::new("local"), MemoryStorage::new("session"))
    }

    fn adapter(primary: &MemoryStorage, secondary: &MemoryStorage) -> PersistenceAdapter {
        PersistenceAdapter::new(Box::new(primary.clone()), Box::new(secondary.clone()), KEY)
    }

    fn sample() -> Vec<TodoList> {
        let mut home = TodoList::new("Home");
        home.items.push(Item::new("dishes"));
        home.items.push(Item {
            text: "laundry".to_string(),
            completed: true,
        });
        home.draft_item_text = "vacu".to_string();
        vec![home, TodoList::new("Work")]
    }

    #[test]
    fn test_starts_loading_until_marked_ready() {
        let (p, s) = backends();
        let mut adapter = adapter(&p, &s);
        assert_eq!(adapter.phase(), Phase::Loading);
        assert_eq!(adapter.on_change(&sample()), SaveOutcome::Skipped);
        assert_eq!(p.counts(KEY).sets, 0);

        adapter.mark_ready();
        assert!(adapter.is_ready());
        assert_eq!(adapter.on_change(&sample()), SaveOutcome::Saved(Backend::Primary));
        assert_eq!(p.counts(KEY).sets, 1);
    }

    #[test]
    fn test_load_prefers_primary() {
        let (p, s) = backends();
        p.seed(KEY, &blob::encode(&sample()).unwrap());
        s.seed(KEY, &blob::encode(&[TodoList::new("Stale")]).unwrap());
        let loaded = adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Backend(Backend::Primary));
        assert_eq!(loaded.lists, sample());
        assert_eq!(s.counts(KEY).gets, 0);
    }

    #[test]
    fn test_load_nothing_anywhere() {
        let (p, s) = backends();
        let loaded = adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Empty);
        assert!(loaded.lists.is_empty());
    }

    #[test]
    fn test_malformed_primary_falls_back_to_secondary() {
        let (p, s) = backends();
        p.seed(KEY, "not json");
        s.seed(KEY, &blob::encode(&sample()).unwrap());
        let loaded = adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Backend(Backend::Secondary));
        assert_eq!(loaded.lists, sample());
    }

    #[test]
    fn test_non_array_primary_falls_back_to_secondary() {
        let (p, s) = backends();
        p.seed(KEY, r#"{"name":"not a list of lists"}"#);
        s.seed(KEY, &blob::encode(&sample()).unwrap());
        let loaded = adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Backend(Backend::Secondary));
    }

    #[test]
    fn test_invalid_everywhere_loads_empty() {
        let (p, s) = backends();
        p.seed(KEY, "not json");
        s.seed(KEY, "\"a string\"");
        assert_eq!(adapter(&p, &s).load().source, LoadSource::Empty);
    }

    #[test]
    fn test_persisted_empty_array_is_valid() {
        let (p, s) = backends();
        p.seed(KEY, "[]");
        s.seed(KEY, &blob::encode(&sample()).unwrap());
        let loaded = adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Backend(Backend::Primary));
        assert!(loaded.lists.is_empty());
    }

    #[test]
    fn test_save_falls_back_when_primary_rejects() {
        let (p, s) = backends();
        p.set_failures(FailureMode::ALL);
        let mut adapter = adapter(&p, &s);
        adapter.mark_ready();
        assert_eq!(adapter.on_change(&sample()), SaveOutcome::Saved(Backend::Secondary));
        assert_eq!(adapter.on_change(&sample()), SaveOutcome::Saved(Backend::Secondary));
        assert_eq!(p.counts(KEY).sets, 2);
        assert!(!p.contains(KEY));

        // Fresh session, primary still broken on read
        let loaded = self::adapter(&p, &s).load();
        assert_eq!(loaded.source, LoadSource::Backend(Backend::Secondary));
        assert_eq!(loaded.lists, sample());
    }

    #[test]
    fn test_save_with_both_backends_broken_is_silent() {
        let (p, s) = backends();
        p.set_failures(FailureMode::ALL);
        s.set_failures(FailureMode::ALL);
        let adapter = adapter(&p, &s);
        assert_eq!(adapter.save(&sample()), SaveOutcome::Unpersisted);
        assert_eq!(adapter.load().source, LoadSource::Empty);
    }

    #[test]
    fn test_empty_lists_clear_both_backends() {
        let (p, s) = backends();
        p.seed(KEY, "[]");
        s.seed(KEY, &blob::encode(&sample()).unwrap());
        let adapter = adapter(&p, &s);
        assert_eq!(adapter.save(&[]), SaveOutcome::Cleared);
        assert!(!p.contains(KEY));
        assert!(!s.contains(KEY));
        assert_eq!(p.counts(KEY).sets, 0);
    }

    #[test]
    fn test_clear_tolerates_each_backend_failing() {
        let (p, s) = backends();
        p.seed(KEY, "[]");
        s.seed(KEY, "[]");
        p.set_failures(FailureMode { remove: true, ..FailureMode::NONE });
        assert_eq!(adapter(&p, &s).save(&[]), SaveOutcome::Cleared);
        assert!(p.contains(KEY));
        assert!(!s.contains(KEY));
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(
            lists in prop::collection::vec(
                (
                    ".{0,12}",
                    prop::collection::vec((".{1,12}", any::<bool>()), 0..6),
                    ".{0,8}",
                ),
                1..6,
            )
        ) {
            let lists: Vec<TodoList> = lists
                .into_iter()
                .map(|(name, items, draft)| TodoList {
                    name,
                    items: items
                        .into_iter()
                        .map(|(text, completed)| Item { text, completed })
                        .collect(),
                    draft_item_text: draft,
                })
                .collect();

            let (p, s) = backends();
            prop_assert_eq!(adapter(&p, &s).save(&lists), SaveOutcome::Saved(Backend::Primary));

            let loaded = adapter(&p, &s).load();
            prop_assert_eq!(loaded.source, LoadSource::Backend(Backend::Primary));
            prop_assert_eq!(loaded.lists, lists);
        }
    }
}
