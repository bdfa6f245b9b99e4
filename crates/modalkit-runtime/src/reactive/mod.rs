#![forbid(unsafe_code)]

//! Reactive values for presentation state.
//!
//! - [`Observable`]: a shared, version-tracked value.
//! - [`Binding`]: a lazily evaluated read-only view over one observable.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Readers poll; nothing is pushed.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Setting a value equal to the current value is a no-op (no version bump).

pub mod binding;
pub mod observable;

pub use binding::{Binding, bind_mapped, bind_observable};
pub use observable::Observable;
