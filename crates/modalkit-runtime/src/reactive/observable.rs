#![forbid(unsafe_code)]

//! Shared, version-tracked values.
//!
//! An `is_presented` flag owned by application code is an
//! `Observable<bool>`; item-driven presentations use `Observable<Option<T>>`.
//! Clones share the same underlying value. The host polls observables once
//! per update, so there is no change notification.
//!
//! # Failure Modes
//!
//! - Calling `set` from inside an `update` or `with` closure on the same
//!   observable panics with a `RefCell` borrow error.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct Inner<T> {
    value: T,
    version: u64,
}

/// A shared value with a change counter.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, bumping the version if it changed.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        if inner.value != value {
            inner.value = value;
            inner.version += 1;
        }
    }

    /// Mutate a copy of the value and store it back.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Number of changes applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}
