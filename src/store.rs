//! In-memory list-of-lists store
//!
//! Every mutation builds a fresh [`Snapshot`] and hands it to the registered
//! listeners in order. Snapshots already handed out are never touched again,
//! so holders can compare them by pointer (`Rc::ptr_eq`) to detect change.
//!
//! Lists and items are addressed purely by position. Deleting shifts every
//! later element down by one.

use std::rc::Rc;

use thiserror::Error;

use crate::model::{Item, TodoList};

/// Immutable view of all lists at one point in time
pub type Snapshot = Rc<Vec<TodoList>>;

/// Positional address that doesn't exist in the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no list at index {index} ({len} lists)")]
    ListOutOfRange { index: usize, len: usize },
    #[error("no item at index {item} in list {list} ({len} items)")]
    ItemOutOfRange { list: usize, item: usize, len: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;

type Listener = Box<dyn FnMut(&Snapshot)>;

/// The single source of truth for rendering
pub struct ListStore {
    lists: Snapshot,
    /// Text typed into the "new list name" field
    new_list_name: String,
    revision: u64,
    listeners: Vec<Listener>,
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore")
            .field("lists", &self.lists)
            .field("new_list_name", &self.new_list_name)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ListStore {
    pub fn new() -> Self {
        Self {
            lists: Rc::new(Vec::new()),
            new_list_name: String::new(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Current snapshot (cheap clone of the `Rc`)
    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.lists)
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Number of snapshots produced so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn new_list_name(&self) -> &str {
        &self.new_list_name
    }

    /// Setter for the name-entry field. Not a list change, so nobody is notified.
    pub fn set_new_list_name(&mut self, value: impl Into<String>) {
        self.new_list_name = value.into();
    }

    /// Register a change listener. Listeners run in registration order
    /// after every snapshot, including [`ListStore::replace_all`].
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Wholesale replace, used when loading persisted state
    pub fn replace_all(&mut self, lists: Vec<TodoList>) -> Snapshot {
        self.commit(lists)
    }

    /// Append a new empty list named `name`.
    ///
    /// Blank names (after trimming) are ignored and return `None`.
    /// On success the name-entry field is cleared.
    pub fn add_list(&mut self, name: &str) -> Option<Snapshot> {
        if name.trim().is_empty() {
            return None;
        }
        log::debug!("Adding list {:?}", name);
        let mut next = self.lists.as_ref().clone();
        next.push(TodoList::new(name));
        self.new_list_name.clear();
        Some(self.commit(next))
    }

    /// Add a list from the current name-entry text (button or Enter key)
    pub fn submit_new_list(&mut self) -> Option<Snapshot> {
        let name = self.new_list_name.clone();
        self.add_list(&name)
    }

    pub fn delete_list(&mut self, list_index: usize) -> StoreResult<Snapshot> {
        self.check_list(list_index)?;
        log::debug!("Deleting list at index {}", list_index);
        let mut next = self.lists.as_ref().clone();
        next.remove(list_index);
        Ok(self.commit(next))
    }

    /// Append the list's draft text as a new item and reset the draft.
    ///
    /// A blank draft is a no-op (`Ok(None)`). The stored text is the draft
    /// as typed; trimming only decides whether it counts as blank.
    pub fn add_item(&mut self, list_index: usize) -> StoreResult<Option<Snapshot>> {
        self.check_list(list_index)?;
        let draft = &self.lists[list_index].draft_item_text;
        if draft.trim().is_empty() {
            return Ok(None);
        }
        log::debug!("Adding item to list {}: {:?}", list_index, draft);
        let mut next = self.lists.as_ref().clone();
        let list = &mut next[list_index];
        let text = std::mem::take(&mut list.draft_item_text);
        list.items.push(Item::new(text));
        Ok(Some(self.commit(next)))
    }

    pub fn delete_item(&mut self, list_index: usize, item_index: usize) -> StoreResult<Snapshot> {
        self.check_item(list_index, item_index)?;
        log::debug!("Deleting item {} from list {}", item_index, list_index);
        let mut next = self.lists.as_ref().clone();
        next[list_index].items.remove(item_index);
        Ok(self.commit(next))
    }

    /// Set the draft text verbatim; trimming happens only in [`ListStore::add_item`]
    pub fn update_draft_item_text(
        &mut self,
        list_index: usize,
        value: impl Into<String>,
    ) -> StoreResult<Snapshot> {
        self.check_list(list_index)?;
        let mut next = self.lists.as_ref().clone();
        next[list_index].draft_item_text = value.into();
        Ok(self.commit(next))
    }

    pub fn toggle_item_completion(
        &mut self,
        list_index: usize,
        item_index: usize,
    ) -> StoreResult<Snapshot> {
        self.check_item(list_index, item_index)?;
        log::debug!("Toggling item {} in list {}", item_index, list_index);
        let mut next = self.lists.as_ref().clone();
        let item = &mut next[list_index].items[item_index];
        item.completed = !item.completed;
        Ok(self.commit(next))
    }

    fn check_list(&self, index: usize) -> StoreResult<()> {
        if index < self.lists.len() {
            Ok(())
        } else {
            Err(StoreError::ListOutOfRange {
                index,
                len: self.lists.len(),
            })
        }
    }

    fn check_item(&self, list: usize, item: usize) -> StoreResult<()> {
        self.check_list(list)?;
        let len = self.lists[list].items.len();
        if item < len {
            Ok(())
        } else {
            Err(StoreError::ItemOutOfRange { list, item, len })
        }
    }

    fn commit(&mut self, next: Vec<TodoList>) -> Snapshot {
        self.lists = Rc::new(next);
        self.revision += 1;
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
        snapshot
    }
}
