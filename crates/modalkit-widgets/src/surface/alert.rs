#![forbid(unsafe_code)]

//! Alert: a centered title, message, and row of buttons.
//!
//! Tapping an enabled button dismisses the alert; the button's action runs
//! once the alert has finished animating out, never while it is still on
//! screen.
//!
//! # Example
//!
//! ```ignore
//! let alert = Alert::new(
//!     "Delete draft?",
//!     "This cannot be undone.",
//!     vec![
//!         AlertButton::destructive("Delete", move || drafts.remove(id)),
//!         AlertButton::cancel("Keep"),
//!     ],
//! );
//! ```
//!
//! Invariants:
//! - At least one button is always present.
//! - At most one cancel button is kept, and it is always last.
//!
//! Failure modes:
//! - Taps on disabled buttons or out-of-range indices are ignored.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use modalkit_core::{Duration, Orientation, SurfaceEvent};

use crate::modal::{
    BasicAnimation, ButtonAction, DismissTrigger, LifecycleAnimations, Orientational,
    PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind, SurfaceResponse,
};

/// Title of the button synthesized when an alert has none.
pub const DEFAULT_BUTTON_TITLE: &str = "OK";

/// Role of an alert button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertButtonRole {
    Primary,
    Secondary,
    Destructive,
    Cancel,
}

/// A button in an alert.
#[derive(Clone)]
pub struct AlertButton {
    pub role: AlertButtonRole,
    pub title: String,
    pub enabled: bool,
    action: Option<ButtonAction>,
}

impl fmt::Debug for AlertButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertButton")
            .field("role", &self.role)
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl AlertButton {
    /// Create a button with an optional action.
    pub fn new(role: AlertButtonRole, title: impl Into<String>, action: Option<ButtonAction>) -> Self {
        Self {
            role,
            title: title.into(),
            enabled: true,
            action,
        }
    }

    pub fn primary(title: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self::new(AlertButtonRole::Primary, title, Some(Rc::new(action)))
    }

    pub fn secondary(title: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self::new(AlertButtonRole::Secondary, title, Some(Rc::new(action)))
    }

    pub fn destructive(title: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self::new(AlertButtonRole::Destructive, title, Some(Rc::new(action)))
    }

    /// A cancel button; dismisses without an action.
    pub fn cancel(title: impl Into<String>) -> Self {
        Self::new(AlertButtonRole::Cancel, title, None)
    }

    /// Attach an action.
    #[must_use]
    pub fn action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// Enable or disable the button.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

/// Normalize a button list for display.
///
/// Keeps only the last cancel button and moves it to the end. An empty list
/// gets a single cancel-role "OK" button.
#[must_use]
pub fn normalize_buttons(buttons: Vec<AlertButton>) -> Vec<AlertButton> {
    if buttons.is_empty() {
        return vec![AlertButton::cancel(DEFAULT_BUTTON_TITLE)];
    }
    let mut cancel = None;
    let mut normalized: Vec<AlertButton> = Vec::with_capacity(buttons.len());
    for button in buttons {
        if button.role == AlertButtonRole::Cancel {
            cancel = Some(button);
        } else {
            normalized.push(button);
        }
    }
    normalized.extend(cancel);
    normalized
}

/// Alert configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertConfig {
    pub width: Orientational<SizeSpec>,
    pub animations: LifecycleAnimations,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            width: Orientational::new(SizeSpec::stretched(30.0), SizeSpec::fraction(0.5)),
            animations: LifecycleAnimations {
                appear: BasicAnimation::ease_out(Duration::from_millis(200)),
                disappear: BasicAnimation::ease_in_out(Duration::from_millis(150)),
                gesture_dismiss: None,
            },
        }
    }
}

impl AlertConfig {
    #[must_use]
    pub fn width(mut self, width: Orientational<SizeSpec>) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn animations(mut self, animations: LifecycleAnimations) -> Self {
        self.animations = animations;
        self
    }

    pub fn validate(&self) -> Result<(), modalkit_core::ConfigError> {
        self.width.portrait.validate("alert.width.portrait")?;
        self.width.landscape.validate("alert.width.landscape")
    }
}

/// A presented alert.
#[derive(Debug, Clone)]
pub struct Alert {
    title: String,
    message: String,
    buttons: Vec<AlertButton>,
    config: AlertConfig,
    width: f64,
    orientation: Orientation,
}

impl Alert {
    /// Create an alert; `buttons` are normalized.
    pub fn new(title: impl Into<String>, message: impl Into<String>, buttons: Vec<AlertButton>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: normalize_buttons(buttons),
            config: AlertConfig::default(),
            width: 0.0,
            orientation: Orientation::Portrait,
        }
    }

    /// Alert whose message is the error's display text.
    pub fn from_error(
        title: impl Into<String>,
        error: &dyn std::error::Error,
        buttons: Vec<AlertButton>,
    ) -> Self {
        Self::new(title, error.to_string(), buttons)
    }

    #[must_use]
    pub fn config(mut self, config: AlertConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn buttons(&self) -> &[AlertButton] {
        &self.buttons
    }

    /// Resolved width for the current container.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn layout(&mut self, ctx: &SurfaceContext<'_>) {
        self.orientation = ctx.container.orientation();
        self.width = self
            .config
            .width
            .current(self.orientation)
            .resolve(ctx.container.size.width);
    }
}

impl PresentedSurface for Alert {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Alert
    }

    fn animations(&self) -> LifecycleAnimations {
        self.config.animations
    }

    fn handle_event(&mut self, event: &SurfaceEvent, _ctx: &SurfaceContext<'_>) -> SurfaceResponse {
        let SurfaceEvent::ButtonTap(index) = *event else {
            return SurfaceResponse::Ignored;
        };
        let Some(button) = self.buttons.get(index).filter(|b| b.enabled) else {
            return SurfaceResponse::Ignored;
        };
        match &button.action {
            Some(action) => SurfaceResponse::DismissThen(DismissTrigger::Button, Rc::clone(action)),
            None => SurfaceResponse::Dismiss(DismissTrigger::Button),
        }
    }

    fn mounted(&mut self, ctx: &SurfaceContext<'_>) {
        self.layout(ctx);
    }

    fn container_changed(&mut self, _change: &crate::modal::ContainerChange, ctx: &SurfaceContext<'_>) -> bool {
        self.layout(ctx);
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
