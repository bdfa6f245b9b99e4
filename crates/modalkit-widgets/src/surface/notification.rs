#![forbid(unsafe_code)]

//! Notification: a banner attached to the top or bottom edge.
//!
//! Notifications dismiss themselves after a timeout, counted from the end of
//! the appear transition, and can be swiped back out through their edge.
//!
//! # Invariants
//!
//! - The timeout task exists only between `presented` and `will_dismiss`; any
//!   other dismissal cancels it, so it never fires for a surface that is
//!   already leaving.
//! - A timeout clears the caller's flag, and the resulting dismissal is
//!   reported with [`DismissTrigger::Timeout`].

use std::any::Any;

use modalkit_core::{ConfigError, ContainerGeometry, Duration, Edge, Instant, SurfaceEvent};
use modalkit_runtime::TaskHandle;

use crate::gesture::{DragEngine, OffsetBounds, SnapAction, SnapPolicy, resolve_edge};
use crate::modal::{
    AnimatedValue, BasicAnimation, ContainerChange, DismissMethods, DismissTrigger,
    LifecycleAnimations, Orientational, PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind,
    SurfaceResponse,
};

/// Default time a notification stays up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Edge a notification slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NotificationEdge {
    #[default]
    Top,
    Bottom,
}

impl NotificationEdge {
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::Top => Edge::Top,
            Self::Bottom => Edge::Bottom,
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotificationConfig {
    pub edge: NotificationEdge,
    pub width: Orientational<SizeSpec>,
    pub dismiss_methods: DismissMethods,
    #[cfg_attr(feature = "serde", serde(with = "crate::modal::duration_ms"))]
    pub timeout: Duration,
    /// Outward swipe, in points, that dismisses.
    pub swipe_dismiss_distance: f64,
    pub velocity_threshold: f64,
    pub drag_animation: BasicAnimation,
    pub snap_animation: BasicAnimation,
    pub animations: LifecycleAnimations,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            edge: NotificationEdge::Top,
            width: Orientational::new(SizeSpec::stretched(15.0), SizeSpec::fraction(0.5)),
            dismiss_methods: DismissMethods::SWIPE | DismissMethods::TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            swipe_dismiss_distance: 20.0,
            velocity_threshold: super::bottom_sheet::DEFAULT_VELOCITY_THRESHOLD,
            drag_animation: BasicAnimation::drag_follow(),
            snap_animation: BasicAnimation::ease_out(Duration::from_millis(200)),
            animations: LifecycleAnimations {
                gesture_dismiss: Some(BasicAnimation::ease_out(Duration::from_millis(100))),
                ..LifecycleAnimations::default()
            },
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn edge(mut self, edge: NotificationEdge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn dismiss_methods(mut self, methods: DismissMethods) -> Self {
        self.dismiss_methods = methods;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn swipe_dismiss_distance(mut self, distance: f64) -> Self {
        self.swipe_dismiss_distance = distance;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.width.portrait.validate("notification.width.portrait")?;
        self.width.landscape.validate("notification.width.landscape")?;
        modalkit_core::error::check_dimension("notification.swipe_dismiss_distance", self.swipe_dismiss_distance)?;
        modalkit_core::error::check_dimension("notification.velocity_threshold", self.velocity_threshold)
            .map(drop)
    }
}

/// A presented notification.
#[derive(Debug)]
pub struct Notification {
    config: NotificationConfig,
    width: f64,
    container_height: f64,
    offset: AnimatedValue,
    drag: DragEngine,
    timeout: Option<TaskHandle>,
}

impl Notification {
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        let edge = config.edge.edge();
        Self {
            config,
            width: 0.0,
            container_height: 0.0,
            offset: AnimatedValue::new(0.0),
            drag: DragEngine::with_sign(edge.axis(), edge.outward_sign()),
            timeout: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Outward offset at `now`; `0` is fully shown.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f64 {
        self.offset.value_at(now)
    }

    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    /// Signed vertical translation from the shown position at `now`.
    #[must_use]
    pub fn displacement(&self, now: Instant) -> f64 {
        self.offset(now) * self.config.edge.edge().outward_sign()
    }

    /// Whether the timeout is armed and has not fired yet.
    #[must_use]
    pub fn is_timeout_pending(&self) -> bool {
        self.timeout.as_ref().is_some_and(TaskHandle::is_pending)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn swipe_enabled(&self) -> bool {
        self.config.dismiss_methods.contains(DismissMethods::SWIPE)
    }

    fn bounds(&self) -> OffsetBounds {
        OffsetBounds::new(0.0, 0.0).with_dismiss_limit(self.container_height)
    }

    fn layout(&mut self, container: ContainerGeometry) {
        self.container_height = container.size.height;
        self.width = self
            .config
            .width
            .current(container.orientation())
            .resolve(container.size.width);
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

impl PresentedSurface for Notification {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Notification
    }

    fn animations(&self) -> LifecycleAnimations {
        self.config.animations
    }

    fn handle_event(&mut self, event: &SurfaceEvent, ctx: &SurfaceContext<'_>) -> SurfaceResponse {
        match event {
            SurfaceEvent::DragChanged(sample) if self.swipe_enabled() => {
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
                let policy = SnapPolicy::new(
                    self.config.velocity_threshold,
                    Some(self.config.swipe_dismiss_distance),
                );
                match resolve_edge(&release, &policy) {
                    SnapAction::Dismiss => SurfaceResponse::Dismiss(DismissTrigger::Swipe),
                    SnapAction::SnapTo(target) => {
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
            _ => SurfaceResponse::Ignored,
        }
    }

    fn mounted(&mut self, ctx: &SurfaceContext<'_>) {
        self.layout(ctx.container);
        self.offset.jump(0.0);
    }

    fn presented(&mut self, ctx: &SurfaceContext<'_>) {
        if !self.config.dismiss_methods.contains(DismissMethods::TIMEOUT) {
            return;
        }
        let trigger = ctx.trigger.clone();
        let late = ctx.scheduler.now().saturating_duration_since(ctx.now);
        self.timeout = Some(ctx.scheduler.schedule_after(
            self.config.timeout.saturating_sub(late),
            "notification_timeout",
            move || trigger.dismiss(),
        ));
        tracing::debug!(
            id = ctx.id,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "notification timeout armed"
        );
    }

    fn will_dismiss(&mut self, ctx: &SurfaceContext<'_>, trigger: DismissTrigger) {
        let cancelled = self.timeout.take().is_some_and(|handle| handle.cancel());
        if cancelled {
            tracing::debug!(id = ctx.id, ?trigger, "notification timeout cancelled");
        }
    }

    fn container_changed(&mut self, change: &ContainerChange, ctx: &SurfaceContext<'_>) -> bool {
        self.layout(ctx.container);
        if change.size_changed {
            self.drag.cancel();
            self.offset.jump(0.0);
        }
        false
    }

    fn binding_dismiss_trigger(&self) -> DismissTrigger {
        match &self.timeout {
            Some(handle) if !handle.is_pending() => DismissTrigger::Timeout,
            _ => DismissTrigger::Binding,
        }
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
    use modalkit_core::{DragSample, Insets, Size};
    use modalkit_runtime::{Observable, Scheduler};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    struct Harness {
        scheduler: Scheduler,
        flag: Observable<bool>,
        trigger: PresentationTrigger,
    }

    impl Harness {
        fn new(t0: Instant) -> Self {
            let flag = Observable::new(true);
            let trigger = PresentationTrigger::flag(&flag);
            Self {
                scheduler: Scheduler::new(t0),
                flag,
                trigger,
            }
        }

        fn ctx(&self) -> SurfaceContext<'_> {
            SurfaceContext {
                id: "toast",
                container: ContainerGeometry::new(Size::new(400.0, 800.0), Insets::ZERO),
                now: self.scheduler.now(),
                scheduler: &self.scheduler,
                trigger: &self.trigger,
            }
        }

        fn shown(&self, config: NotificationConfig) -> Notification {
            let mut toast = Notification::new(config);
            toast.mounted(&self.ctx());
            toast.presented(&self.ctx());
            toast
        }
    }

    #[test]
    fn width_resolves_on_mount() {
        let h = Harness::new(Instant::now());
        let toast = h.shown(NotificationConfig::default());
        assert_eq!(toast.width(), 370.0);
    }

    #[test]
    fn timeout_clears_flag_and_reports_timeout() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        let toast = h.shown(NotificationConfig::default());
        assert!(toast.is_timeout_pending());
        assert_eq!(toast.binding_dismiss_trigger(), DismissTrigger::Binding);

        h.scheduler.advance_to(t0 + ms(4_999));
        assert!(h.flag.get());
        h.scheduler.advance_to(t0 + DEFAULT_TIMEOUT);
        assert!(!h.flag.get());
        assert!(!toast.is_timeout_pending());
        assert_eq!(toast.binding_dismiss_trigger(), DismissTrigger::Timeout);
    }

    #[test]
    fn timeout_counts_from_appear_end() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        h.scheduler.advance_to(t0 + ms(2_000));
        let mut toast = Notification::new(NotificationConfig::default());
        toast.mounted(&h.ctx());
        toast.presented(&SurfaceContext { now: t0, ..h.ctx() });

        h.scheduler.advance_to(t0 + ms(4_999));
        assert!(h.flag.get());
        h.scheduler.advance_to(t0 + DEFAULT_TIMEOUT);
        assert!(!h.flag.get());
    }

    #[test]
    fn other_dismissal_cancels_timeout() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        let mut toast = h.shown(NotificationConfig::default());
        toast.will_dismiss(&h.ctx(), DismissTrigger::External);
        assert!(!toast.is_timeout_pending());
        assert_eq!(h.scheduler.pending(), 0);
        h.scheduler.advance_to(t0 + ms(10_000));
        assert!(h.flag.get());
    }

    #[test]
    fn timeout_disabled_schedules_nothing() {
        let h = Harness::new(Instant::now());
        let toast = h.shown(NotificationConfig::default().dismiss_methods(DismissMethods::SWIPE));
        assert!(!toast.is_timeout_pending());
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn upward_swipe_dismisses_top_notification() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        let mut toast = h.shown(NotificationConfig::default());
        let response = toast.handle_event(&SurfaceEvent::DragChanged(DragSample::vertical(-15.0, t0)), &h.ctx());
        assert!(matches!(response, SurfaceResponse::Handled));
        assert_eq!(toast.target_offset(), 15.0);
        h.scheduler.advance_to(t0 + ms(500));
        let response = toast.handle_event(&SurfaceEvent::DragEnded(DragSample::vertical(-22.0, t0 + ms(500))), &h.ctx());
        assert!(matches!(response, SurfaceResponse::Dismiss(DismissTrigger::Swipe)));
    }

    #[test]
    fn downward_drag_on_top_notification_stays() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        let mut toast = h.shown(NotificationConfig::default());
        toast.handle_event(&SurfaceEvent::DragChanged(DragSample::vertical(40.0, t0)), &h.ctx());
        assert_eq!(toast.target_offset(), 0.0);
        let response = toast.handle_event(&SurfaceEvent::DragEnded(DragSample::vertical(60.0, t0 + ms(10))), &h.ctx());
        assert!(matches!(response, SurfaceResponse::Handled));
        assert_eq!(toast.target_offset(), 0.0);
    }

    #[test]
    fn bottom_notification_swipes_down() {
        let t0 = Instant::now();
        let h = Harness::new(t0);
        let mut toast = h.shown(NotificationConfig::default().edge(NotificationEdge::Bottom));
        toast.handle_event(&SurfaceEvent::DragChanged(DragSample::vertical(25.0, t0)), &h.ctx());
        assert_eq!(toast.displacement(t0 + ms(200)), 25.0);
        h.scheduler.advance_to(t0 + ms(800));
        let response = toast.handle_event(&SurfaceEvent::DragEnded(DragSample::vertical(25.0, t0 + ms(800))), &h.ctx());
        assert!(matches!(response, SurfaceResponse::Dismiss(DismissTrigger::Swipe)));
    }
}
