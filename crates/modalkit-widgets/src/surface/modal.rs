#![forbid(unsafe_code)]

//! Centered modal with an optional close button and back-tap dismissal.

use std::any::Any;

use modalkit_core::{ConfigError, Size, SurfaceEvent};

use crate::modal::{
    ContainerChange, DismissMethods, DismissTrigger, LifecycleAnimations, Orientational,
    PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind, SurfaceResponse, SurfaceSize,
};

/// Modal configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    pub size: Orientational<SurfaceSize>,
    pub dismiss_methods: DismissMethods,
    pub animations: LifecycleAnimations,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            size: Orientational::new(
                SurfaceSize::new(SizeSpec::stretched(10.0), SizeSpec::fraction(0.6)),
                SurfaceSize::new(SizeSpec::fraction(0.7), SizeSpec::stretched(10.0)),
            ),
            dismiss_methods: DismissMethods::TRAILING_BUTTON,
            animations: LifecycleAnimations::default(),
        }
    }
}

impl ModalConfig {
    #[must_use]
    pub fn size(mut self, size: Orientational<SurfaceSize>) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn dismiss_methods(mut self, methods: DismissMethods) -> Self {
        self.dismiss_methods = methods;
        self
    }

    #[must_use]
    pub fn animations(mut self, animations: LifecycleAnimations) -> Self {
        self.animations = animations;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.portrait.validate()?;
        self.size.landscape.validate()
    }
}

/// A presented modal.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    config: ModalConfig,
    size: Size,
}

impl Modal {
    #[must_use]
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            size: Size::ZERO,
        }
    }

    /// Resolved size for the current container.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn has_close_button(&self) -> bool {
        self.config.dismiss_methods.has_close_button()
    }

    fn layout(&mut self, ctx: &SurfaceContext<'_>) {
        let spec = self.config.size.current(ctx.container.orientation());
        self.size = spec.resolve(ctx.container.size);
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new(ModalConfig::default())
    }
}

impl PresentedSurface for Modal {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Modal
    }

    fn animations(&self) -> LifecycleAnimations {
        self.config.animations
    }

    fn handle_event(&mut self, event: &SurfaceEvent, _ctx: &SurfaceContext<'_>) -> SurfaceResponse {
        let methods = self.config.dismiss_methods;
        match event {
            SurfaceEvent::BackTap if methods.contains(DismissMethods::BACK_TAP) => {
                SurfaceResponse::Dismiss(DismissTrigger::BackTap)
            }
            SurfaceEvent::CloseButton if methods.has_close_button() => {
                SurfaceResponse::Dismiss(DismissTrigger::CloseButton)
            }
            _ => SurfaceResponse::Ignored,
        }
    }

    fn mounted(&mut self, ctx: &SurfaceContext<'_>) {
        self.layout(ctx);
    }

    fn container_changed(&mut self, _change: &ContainerChange, ctx: &SurfaceContext<'_>) -> bool {
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
