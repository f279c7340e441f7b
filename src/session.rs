//! One page session: a list store wired to a persistence adapter
//!
//! Startup runs probe → load → populate → ready. The store is populated while
//! the adapter is still in its loading phase, so that change is observed but
//! never written. Every later change is saved in the order it was made.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::persistence::{
    probe, LoadSource, Phase, PersistenceAdapter, ProbeReport, SaveOutcome,
};
use crate::settings::Settings;
use crate::store::ListStore;

pub struct TodoSession {
    store: ListStore,
    adapter: Rc<RefCell<PersistenceAdapter>>,
    last_save: Rc<Cell<Option<SaveOutcome>>>,
    load_source: LoadSource,
    probe_report: Option<ProbeReport>,
}

impl TodoSession {
    pub fn start(adapter: PersistenceAdapter, settings: &Settings) -> Self {
        log::info!("Session starting - loading data...");

        let probe_report = settings.probe_on_start.then(|| probe::probe(&adapter));
        let loaded = adapter.load();

        let adapter = Rc::new(RefCell::new(adapter));
        let last_save = Rc::new(Cell::new(None));
        let mut store = ListStore::new();
        {
            let adapter = Rc::clone(&adapter);
            let last_save = Rc::clone(&last_save);
            store.subscribe(move |snapshot| {
                let outcome = adapter.borrow_mut().on_change(snapshot);
                last_save.set(Some(outcome));
            });
        }

        store.replace_all(loaded.lists);
        adapter.borrow_mut().mark_ready();

        Self {
            store,
            adapter,
            last_save,
            load_source: loaded.source,
            probe_report,
        }
    }

    /// Session over this platform's storage backends
    pub fn with_platform_backends(settings: &Settings) -> Self {
        let (primary, secondary) = crate::platform::backends();
        let adapter = PersistenceAdapter::new(primary, secondary, settings.storage_key.as_str());
        Self::start(adapter, settings)
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Mutations made through this are saved automatically
    pub fn store_mut(&mut self) -> &mut ListStore {
        &mut self.store
    }

    pub fn phase(&self) -> Phase {
        self.adapter.borrow().phase()
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Outcome of the most recent change notification
    pub fn last_save(&self) -> Option<SaveOutcome> {
        self.last_save.get()
    }

    pub fn probe_report(&self) -> Option<&ProbeReport> {
        self.probe_report.as_ref()
    }
}
