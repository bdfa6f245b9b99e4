#![forbid(unsafe_code)]

//! The built-in surfaces.
//!
//! | Surface | Sizing | Dismissed by |
//! |---------|--------|--------------|
//! | [`Alert`] | width per orientation | any enabled button |
//! | [`Modal`] | width and height per orientation | close button, back tap |
//! | [`BottomSheet`] | min/ideal/max detents | pull-down, close button, back tap |
//! | [`SideBar`] | extent along its edge | drag back, back tap |
//! | [`Notification`] | width per orientation | swipe, timeout |
//!
//! Each surface takes a plain config struct with a `Default` and builder
//! methods; with the `serde` feature the configs are (de)serializable.

mod alert;
mod bottom_sheet;
mod modal;
mod notification;
mod side_bar;

pub use alert::{
    Alert, AlertButton, AlertButtonRole, AlertConfig, DEFAULT_BUTTON_TITLE, normalize_buttons,
};
pub use bottom_sheet::{BottomSheet, BottomSheetConfig, DEFAULT_VELOCITY_THRESHOLD, DismissDistance};
pub use modal::{Modal, ModalConfig};
pub use notification::{DEFAULT_TIMEOUT, Notification, NotificationConfig, NotificationEdge};
pub use side_bar::{SideBar, SideBarConfig};
