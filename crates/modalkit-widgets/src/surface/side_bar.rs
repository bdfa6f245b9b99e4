#![forbid(unsafe_code)]

//! Side bar: a panel attached to one container edge.
//!
//! The panel's offset is the distance it has been pushed back out through
//! its edge: `0` is fully shown, positive values are partially hidden. A
//! drag outward past `drag_back_dismiss_ratio` of the extent (or a fast
//! outward flick) dismisses; anything else springs back to `0`.

use std::any::Any;

use modalkit_core::{
    Axis, ConfigError, ContainerGeometry, Duration, Edge, Instant, Size, SurfaceEvent, Vector,
};

use crate::gesture::{DragEngine, OffsetBounds, SnapAction, SnapPolicy, resolve_edge};
use crate::modal::{
    AnimatedValue, BasicAnimation, ContainerChange, DismissMethods, DismissTrigger,
    LifecycleAnimations, Orientational, PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind,
    SurfaceResponse,
};

/// Side bar configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SideBarConfig {
    pub edge: Edge,
    /// Size along the edge's axis.
    pub extent: Orientational<SizeSpec>,
    pub dismiss_methods: DismissMethods,
    /// Outward drag, as a fraction of the extent, that dismisses.
    pub drag_back_dismiss_ratio: f64,
    pub velocity_threshold: f64,
    pub drag_animation: BasicAnimation,
    pub snap_animation: BasicAnimation,
    pub animations: LifecycleAnimations,
    pub resign_focus_on_orientation_change: bool,
}

impl Default for SideBarConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Leading,
            extent: Orientational::new(SizeSpec::fraction(0.75), SizeSpec::fraction(0.5)),
            dismiss_methods: DismissMethods::BACK_TAP | DismissMethods::DRAG_BACK,
            drag_back_dismiss_ratio: 0.1,
            velocity_threshold: super::bottom_sheet::DEFAULT_VELOCITY_THRESHOLD,
            drag_animation: BasicAnimation::drag_follow(),
            snap_animation: BasicAnimation::ease_out(Duration::from_millis(200)),
            animations: LifecycleAnimations {
                gesture_dismiss: Some(BasicAnimation::ease_out(Duration::from_millis(100))),
                ..LifecycleAnimations::default()
            },
            resign_focus_on_orientation_change: true,
        }
    }
}

impl SideBarConfig {
    #[must_use]
    pub fn edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn extent(mut self, extent: Orientational<SizeSpec>) -> Self {
        self.extent = extent;
        self
    }

    #[must_use]
    pub fn dismiss_methods(mut self, methods: DismissMethods) -> Self {
        self.dismiss_methods = methods;
        self
    }

    #[must_use]
    pub fn drag_back_dismiss_ratio(mut self, ratio: f64) -> Self {
        self.drag_back_dismiss_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extent.portrait.validate("side_bar.extent.portrait")?;
        self.extent.landscape.validate("side_bar.extent.landscape")?;
        modalkit_core::error::check_fraction("side_bar.drag_back_dismiss_ratio", self.drag_back_dismiss_ratio)?;
        modalkit_core::error::check_dimension("side_bar.velocity_threshold", self.velocity_threshold)
            .map(drop)
    }
}

/// A presented side bar.
#[derive(Debug, Clone)]
pub struct SideBar {
    config: SideBarConfig,
    container: ContainerGeometry,
    extent: f64,
    offset: AnimatedValue,
    drag: DragEngine,
}

impl SideBar {
    #[must_use]
    pub fn new(config: SideBarConfig) -> Self {
        let edge = config.edge;
        Self {
            config,
            container: ContainerGeometry::default(),
            extent: 0.0,
            offset: AnimatedValue::new(0.0),
            drag: DragEngine::with_sign(edge.axis(), edge.outward_sign()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SideBarConfig {
        &self.config
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.config.edge
    }

    /// Resolved size along the edge's axis.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Panel size: the extent along the edge's axis, the full container
    /// across it.
    #[must_use]
    pub fn size(&self) -> Size {
        let container = self.container.size;
        match self.config.edge.axis() {
            Axis::Horizontal => Size::new(self.extent, container.height),
            Axis::Vertical => Size::new(container.width, self.extent),
        }
    }

    /// Outward offset at `now`.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f64 {
        self.offset.value_at(now)
    }

    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    /// Translation from the shown position at `now`, in container space.
    #[must_use]
    pub fn displacement(&self, now: Instant) -> Vector {
        let along = self.offset(now) * self.config.edge.outward_sign();
        match self.config.edge.axis() {
            Axis::Horizontal => Vector::new(along, 0.0),
            Axis::Vertical => Vector::new(0.0, along),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn layout(&mut self, container: ContainerGeometry) {
        self.container = container;
        let available = container.size.along(self.config.edge.axis());
        self.extent = self
            .config
            .extent
            .current(container.orientation())
            .resolve(available);
    }

    fn drag_back_enabled(&self) -> bool {
        self.config.dismiss_methods.contains(DismissMethods::DRAG_BACK)
    }

    fn bounds(&self) -> OffsetBounds {
        OffsetBounds::new(0.0, 0.0).with_dismiss_limit(self.extent)
    }

    fn policy(&self) -> SnapPolicy {
        SnapPolicy::new(
            self.config.velocity_threshold,
            Some(self.config.drag_back_dismiss_ratio * self.extent),
        )
    }
}

impl Default for SideBar {
    fn default() -> Self {
        Self::new(SideBarConfig::default())
    }
}

impl PresentedSurface for SideBar {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::SideBar
    }

    fn animations(&self) -> LifecycleAnimations {
        self.config.animations
    }

    fn handle_event(&mut self, event: &SurfaceEvent, ctx: &SurfaceContext<'_>) -> SurfaceResponse {
        match event {
            SurfaceEvent::DragChanged(sample) if self.drag_back_enabled() => {
                let bounds = self.bounds();
                let offset = self.drag.changed(sample, self.offset.target(), &bounds);
                self.offset.set(offset, self.config.drag_animation, ctx.now);
                SurfaceResponse::Handled
            }
            SurfaceEvent::DragEnded(sample) => {
                let bounds = self.bounds();
                let Some(release) = self.drag.ended(sample, &bounds) else {
                    return SurfaceResponse::Ignored;
                };
                match resolve_edge(&release, &self.policy()) {
                    SnapAction::Dismiss => SurfaceResponse::Dismiss(DismissTrigger::DragBack),
                    SnapAction::SnapTo(target) => {
                        tracing::debug!(id = ctx.id, offset = release.offset, "side bar snapped back");
                        self.offset.set(target, self.config.snap_animation, ctx.now);
                        SurfaceResponse::Handled
                    }
                }
            }
            SurfaceEvent::DragCancelled => match self.drag.cancel() {
                Some(origin) => {
                    self.offset.set(origin, self.config.snap_animation, ctx.now);
                    SurfaceResponse::Handled
                }
                None => SurfaceResponse::Ignored,
            },
            SurfaceEvent::BackTap if self.config.dismiss_methods.contains(DismissMethods::BACK_TAP) => {
                SurfaceResponse::Dismiss(DismissTrigger::BackTap)
            }
            _ => SurfaceResponse::Ignored,
        }
    }

    fn mounted(&mut self, ctx: &SurfaceContext<'_>) {
        self.layout(ctx.container);
        self.offset.jump(0.0);
    }

    fn container_changed(&mut self, change: &ContainerChange, ctx: &SurfaceContext<'_>) -> bool {
        self.layout(ctx.container);
        if change.size_changed {
            self.drag.cancel();
            self.offset.jump(0.0);
        }
        change.orientation_changed && self.config.resign_focus_on_orientation_change
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::PresentationTrigger;
    use modalkit_core::{DragSample, Insets};
    use modalkit_runtime::{Observable, Scheduler};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn with_ctx<R>(container: ContainerGeometry, now: Instant, f: impl FnOnce(&SurfaceContext<'_>) -> R) -> R {
        let scheduler = Scheduler::new(now);
        let flag = Observable::new(true);
        let trigger = PresentationTrigger::flag(&flag);
        f(&SurfaceContext {
            id: "menu",
            container,
            now,
            scheduler: &scheduler,
            trigger: &trigger,
        })
    }

    fn portrait() -> ContainerGeometry {
        ContainerGeometry::new(Size::new(400.0, 800.0), Insets::ZERO)
    }

    fn send(bar: &mut SideBar, event: SurfaceEvent, now: Instant) -> SurfaceResponse {
        with_ctx(portrait(), now, |ctx| bar.handle_event(&event, ctx))
    }

    fn mounted(config: SideBarConfig, now: Instant) -> SideBar {
        let mut bar = SideBar::new(config);
        with_ctx(portrait(), now, |ctx| bar.mounted(ctx));
        bar
    }

    #[test]
    fn extent_follows_edge_axis() {
        let t0 = Instant::now();
        let leading = mounted(SideBarConfig::default(), t0);
        assert_eq!(leading.extent(), 300.0);
        assert_eq!(leading.size(), Size::new(300.0, 800.0));

        let top = mounted(SideBarConfig::default().edge(Edge::Top), t0);
        assert_eq!(top.extent(), 600.0);
        assert_eq!(top.size(), Size::new(400.0, 600.0));
    }

    #[test]
    fn inward_drag_is_clamped_at_shown() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default(), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(50.0, t0)), t0);
        assert_eq!(bar.target_offset(), 0.0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-10.0, t0 + ms(5))), t0 + ms(5));
        assert_eq!(bar.target_offset(), 10.0);
        assert_eq!(bar.displacement(t0 + ms(500)), Vector::new(-10.0, 0.0));
    }

    #[test]
    fn slow_drag_past_ratio_dismisses() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default(), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-20.0, t0)), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-30.0, t0 + ms(500))), t0 + ms(500));
        let response = send(&mut bar, SurfaceEvent::DragEnded(DragSample::horizontal(-30.0, t0 + ms(600))), t0 + ms(600));
        assert!(matches!(response, SurfaceResponse::Dismiss(DismissTrigger::DragBack)));
    }

    #[test]
    fn short_slow_drag_springs_back() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default(), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-20.0, t0)), t0);
        let response = send(&mut bar, SurfaceEvent::DragEnded(DragSample::horizontal(-25.0, t0 + ms(100))), t0 + ms(100));
        assert!(matches!(response, SurfaceResponse::Handled));
        assert_eq!(bar.target_offset(), 0.0);
    }

    #[test]
    fn fast_outward_flick_dismisses_trailing() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default().edge(Edge::Trailing), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(2.0, t0)), t0);
        assert_eq!(bar.target_offset(), 2.0);
        let response = send(&mut bar, SurfaceEvent::DragEnded(DragSample::horizontal(12.0, t0 + ms(10))), t0 + ms(10));
        assert!(matches!(response, SurfaceResponse::Dismiss(DismissTrigger::DragBack)));
    }

    #[test]
    fn drag_back_disabled_ignores_drags() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default().dismiss_methods(DismissMethods::BACK_TAP), t0);
        let response = send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-100.0, t0)), t0);
        assert!(matches!(response, SurfaceResponse::Ignored));
        assert!(!bar.is_dragging());
        assert!(matches!(
            send(&mut bar, SurfaceEvent::BackTap, t0),
            SurfaceResponse::Dismiss(DismissTrigger::BackTap)
        ));
    }

    #[test]
    fn rotation_resets_offset_and_extent() {
        let t0 = Instant::now();
        let mut bar = mounted(SideBarConfig::default(), t0);
        send(&mut bar, SurfaceEvent::DragChanged(DragSample::horizontal(-40.0, t0)), t0);
        let landscape = ContainerGeometry::new(Size::new(800.0, 400.0), Insets::ZERO);
        let change = ContainerChange::between(&portrait(), &landscape);
        let resign = with_ctx(landscape, t0 + ms(5), |ctx| bar.container_changed(&change, ctx));
        assert!(resign);
        assert!(!bar.is_dragging());
        assert_eq!(bar.target_offset(), 0.0);
        assert_eq!(bar.extent(), 400.0);
    }

    #[test]
    fn config_validation() {
        assert!(SideBarConfig::default().validate().is_ok());
        assert!(SideBarConfig::default().drag_back_dismiss_ratio(1.5).validate().is_err());
    }
}
