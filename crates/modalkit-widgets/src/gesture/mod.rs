#![forbid(unsafe_code)]

//! Drag handling shared by the bottom sheet, side bar, and notification.
//!
//! [`DragEngine`] turns drag samples into clamped offsets and a final
//! [`DragRelease`]; the snap functions turn that release into a
//! [`SnapAction`].

mod drag;
mod snap;

pub use drag::{DragEngine, DragRelease, DragSession, OffsetBounds};
pub use snap::{
    Detent, DetentUnit, Detents, Region, ResolvedDetents, SnapAction, SnapPolicy, resolve_edge,
    resolve_resizable,
};
