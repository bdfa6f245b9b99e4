#![forbid(unsafe_code)]

//! Read-only bindings derived from [`Observable`] values.
//!
//! A [`Binding<T>`] encapsulates an observable source plus an optional
//! transform. Presentation triggers use bindings to read "is this surface
//! presented?" out of whatever state the caller owns: a `bool` flag, an
//! optional item, or an optional error.
//!
//! # Usage
//!
//! ```ignore
//! use modalkit_runtime::reactive::{Observable, bind_mapped};
//!
//! let selected: Observable<Option<u32>> = Observable::new(None);
//! let is_presented = bind_mapped(&selected, Option::is_some);
//! assert!(!is_presented.get());
//!
//! selected.set(Some(4));
//! assert!(is_presented.get());
//! ```
//!
//! # Invariants
//!
//! 1. `Binding::get()` always returns the current (not stale) value.
//! 2. A binding's transform is applied on every `get()` call (no caching).
//! 3. Bindings are `Clone` and share the source observable.
//!
//! # Failure Modes
//!
//! - Transform panic: propagates to caller of `get()`.
//! - Source dropped while binding alive: binding still works (Rc keeps inner alive).

use std::rc::Rc;

use super::observable::Observable;

/// A read-only binding to an [`Observable`] value with an optional transform.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// Get the current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Create a direct binding to an observable (identity transform).
pub fn bind_observable<T: Clone + PartialEq + 'static>(source: &Observable<T>) -> Binding<T> {
    let src = source.clone();
    Binding {
        eval: Rc::new(move || src.get()),
    }
}

/// Create a mapped binding: `source` value transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding {
        eval: Rc::new(move || src.with(|v| map(v))),
    }
}
