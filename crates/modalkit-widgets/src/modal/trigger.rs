#![forbid(unsafe_code)]

//! Caller-owned presentation state.
//!
//! A [`PresentationTrigger`] reads "should this surface be presented?" out
//! of an [`Observable`] the caller owns, and knows how to write "not
//! presented" back into it. Three shapes are supported:
//!
//! - a `bool` flag,
//! - an `Option<T>` item (presented while `Some`),
//! - an `Option<E>` error (presented while `Some`).
//!
//! For item and error triggers the current value is exposed as a payload so
//! the host can cache it: once the caller clears the option, the exit
//! animation still renders the last value.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use modalkit_runtime::{Binding, Observable, bind_mapped, bind_observable};

/// Shape of the state driving a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Flag,
    Item,
    Error,
}

type PayloadFn = Rc<dyn Fn() -> Option<Rc<dyn Any>>>;

/// Two-way view of a presentation flag.
#[derive(Clone)]
pub struct PresentationTrigger {
    kind: TriggerKind,
    is_presented: Binding<bool>,
    reset: Rc<dyn Fn()>,
    payload: Option<PayloadFn>,
}

impl fmt::Debug for PresentationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationTrigger")
            .field("kind", &self.kind)
            .field("is_presented", &self.is_presented())
            .finish()
    }
}

impl PresentationTrigger {
    /// Presented while `flag` is `true`.
    #[must_use]
    pub fn flag(flag: &Observable<bool>) -> Self {
        let target = flag.clone();
        Self {
            kind: TriggerKind::Flag,
            is_presented: bind_observable(flag),
            reset: Rc::new(move || target.set(false)),
            payload: None,
        }
    }

    /// Presented while `item` is `Some`; the item is the payload.
    #[must_use]
    pub fn item<T: Clone + PartialEq + 'static>(item: &Observable<Option<T>>) -> Self {
        Self::optional(TriggerKind::Item, item)
    }

    /// Presented while `error` is `Some`; the error is the payload.
    #[must_use]
    pub fn error<E>(error: &Observable<Option<E>>) -> Self
    where
        E: std::error::Error + Clone + PartialEq + 'static,
    {
        Self::optional(TriggerKind::Error, error)
    }

    fn optional<T: Clone + PartialEq + 'static>(kind: TriggerKind, source: &Observable<Option<T>>) -> Self {
        let target = source.clone();
        let reader = source.clone();
        Self {
            kind,
            is_presented: bind_mapped(source, Option::is_some),
            reset: Rc::new(move || target.set(None)),
            payload: Some(Rc::new(move || {
                reader.get().map(|value| Rc::new(value) as Rc<dyn Any>)
            })),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    /// Current value of the caller's state.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.is_presented.get()
    }

    /// Write "not presented" into the caller's state.
    pub fn dismiss(&self) {
        (self.reset)();
    }

    /// Current payload, for item and error triggers that hold a value.
    #[must_use]
    pub fn payload(&self) -> Option<Rc<dyn Any>> {
        self.payload.as_ref().and_then(|read| read())
    }
}
