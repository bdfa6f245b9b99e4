#![forbid(unsafe_code)]

//! Process-wide presentation records, passed around as an explicit handle.
//!
//! Item- and error-driven presentations flip to "not presented" the moment
//! the driving optional becomes `None`, yet the exit animation still has to
//! draw the old content. The registry keeps the last non-`None` payload per
//! presentation id so surfaces can render it until they unmount.
//!
//! # Invariants
//!
//! 1. A record is created on first use of an id and never deleted (ids are a
//!    finite set of developer-chosen strings); only [`PresentationRegistry::clear`]
//!    empties the registry.
//! 2. Writes are whole-value overwrites keyed by id.
//! 3. A payload is cleared when a different layer claims the id, or
//!    explicitly via [`PresentationRegistry::clear_payload`] when a new cycle
//!    starts without one.
//!
//! # Failure Modes
//!
//! - `get` for an unknown id returns `None`.
//! - `get_as::<T>` with the wrong type returns `None`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

/// Stored state for one presentation id.
#[derive(Clone)]
pub struct PresentationRecord {
    pub id: String,
    pub layer_id: Option<String>,
    pub is_presented: bool,
    payload: Option<Rc<dyn Any>>,
}

impl PresentationRecord {
    fn new(id: &str, layer_id: Option<&str>) -> Self {
        Self {
            id: id.to_owned(),
            layer_id: layer_id.map(str::to_owned),
            is_presented: false,
            payload: None,
        }
    }

    /// Whether a payload is cached.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// The cached payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<Rc<dyn Any>> {
        self.payload.clone()
    }
}

impl fmt::Debug for PresentationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationRecord")
            .field("id", &self.id)
            .field("layer_id", &self.layer_id)
            .field("is_presented", &self.is_presented)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

/// Shared handle to the presentation record store.
///
/// Cloning the handle shares the store. Access is confined to the UI
/// thread, so there is no locking.
#[derive(Clone, Default)]
pub struct PresentationRegistry {
    records: Rc<RefCell<AHashMap<String, PresentationRecord>>>,
}

impl fmt::Debug for PresentationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationRegistry")
            .field("records", &self.records.borrow().len())
            .finish()
    }
}

impl PresentationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `layer_id`, creating its record on first use.
    ///
    /// If the id was last used by a different layer, its cached payload is
    /// dropped. Returns `true` if the record was created or reassigned.
    pub fn claim(&self, id: &str, layer_id: Option<&str>) -> bool {
        let mut records = self.records.borrow_mut();
        match records.get_mut(id) {
            Some(record) if record.layer_id.as_deref() == layer_id => false,
            Some(record) => {
                record.layer_id = layer_id.map(str::to_owned);
                record.payload = None;
                true
            }
            None => {
                records.insert(id.to_owned(), PresentationRecord::new(id, layer_id));
                true
            }
        }
    }

    /// Store (overwrite) the cached payload for `id`.
    pub fn set<T: Any>(&self, id: &str, value: T) {
        self.set_shared(id, Rc::new(value));
    }

    /// Store an already shared payload for `id`.
    pub fn set_shared(&self, id: &str, value: Rc<dyn Any>) {
        self.records
            .borrow_mut()
            .entry(id.to_owned())
            .or_insert_with(|| PresentationRecord::new(id, None))
            .payload = Some(value);
    }

    /// Drop the cached payload for `id`, keeping the record.
    pub fn clear_payload(&self, id: &str) {
        if let Some(record) = self.records.borrow_mut().get_mut(id) {
            record.payload = None;
        }
    }

    /// The cached payload for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rc<dyn Any>> {
        self.records.borrow().get(id).and_then(|r| r.payload.clone())
    }

    /// The cached payload for `id`, downcast to `T`.
    #[must_use]
    pub fn get_as<T: Any>(&self, id: &str) -> Option<Rc<T>> {
        self.get(id).and_then(|payload| payload.downcast::<T>().ok())
    }

    /// Record whether `id` is currently presented.
    pub fn set_presented(&self, id: &str, is_presented: bool) {
        self.records
            .borrow_mut()
            .entry(id.to_owned())
            .or_insert_with(|| PresentationRecord::new(id, None))
            .is_presented = is_presented;
    }

    /// Whether `id` is recorded as presented.
    #[must_use]
    pub fn is_presented(&self, id: &str) -> bool {
        self.records
            .borrow()
            .get(id)
            .is_some_and(|r| r.is_presented)
    }

    /// Snapshot of the record for `id`.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<PresentationRecord> {
        self.records.borrow().get(id).cloned()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether the registry has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Drop every record (application or test-harness reset).
    pub fn clear(&self) {
        let records = std::mem::take(&mut *self.records.borrow_mut());
        drop(records);
    }
}
