#![forbid(unsafe_code)]

//! Bottom sheet: a resizable panel resting at min/ideal/max detents.
//!
//! Dragging moves the sheet between detents; on release the snap resolver
//! picks the detent to settle at, or dismisses when the sheet was pulled
//! far enough (or fast enough) below its minimum height.
//!
//! # Invariants
//!
//! - At rest, `target_offset` is always one of the three detent offsets.
//! - A container size change discards any drag in progress and resets the
//!   sheet to the ideal detent of the *new* container.
//!
//! # Failure Modes
//!
//! - A drag end with no preceding drag change is ignored.
//! - Drags on a sheet that is neither resizable nor pull-down dismissable are
//!   ignored.

use std::any::Any;

use modalkit_core::{
    Axis, ConfigError, ContainerGeometry, DragSample, Duration, Edges, Insets, Instant,
    SurfaceEvent,
};

use crate::gesture::{
    Detent, Detents, DragEngine, OffsetBounds, ResolvedDetents, SnapAction, SnapPolicy,
    resolve_resizable,
};
use crate::modal::{
    AnimatedValue, BasicAnimation, ContainerChange, DismissMethods, DismissTrigger,
    LifecycleAnimations, Orientational, PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind,
    SurfaceResponse,
};

/// Default speed above which a release snaps by direction, in points per
/// second.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 600.0;

/// How far below the min detent a slow pull must travel to dismiss.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DismissDistance {
    Points(f64),
    /// Fraction of the resolved min height.
    FractionOfMin(f64),
}

impl DismissDistance {
    #[must_use]
    pub fn resolve(self, min_height: f64) -> f64 {
        match self {
            Self::Points(points) => points,
            Self::FractionOfMin(fraction) => fraction * min_height,
        }
    }

    fn validate(self) -> Result<(), ConfigError> {
        const FIELD: &str = "bottom_sheet.pull_down_dismiss_distance";
        match self {
            Self::Points(points) => modalkit_core::error::check_dimension(FIELD, points).map(drop),
            Self::FractionOfMin(fraction) => modalkit_core::error::check_fraction(FIELD, fraction).map(drop),
        }
    }
}

/// Bottom sheet configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BottomSheetConfig {
    pub width: Orientational<SizeSpec>,
    pub heights: Orientational<Detents>,
    pub dismiss_methods: DismissMethods,
    pub pull_down_dismiss_distance: DismissDistance,
    pub velocity_threshold: f64,
    pub drag_animation: BasicAnimation,
    pub snap_animation: BasicAnimation,
    pub animations: LifecycleAnimations,
    /// Safe-area edges the content is inset from.
    pub content_safe_area_edges: Edges,
    /// Lay content out at the visible height instead of the max detent.
    pub autoresizes_content: bool,
    pub resign_focus_on_orientation_change: bool,
}

impl Default for BottomSheetConfig {
    fn default() -> Self {
        Self {
            width: Orientational::new(SizeSpec::fraction(1.0), SizeSpec::fraction(0.7)),
            heights: Orientational::new(
                Detents::fraction(0.3, 0.6, 0.9),
                Detents::fraction(0.9, 0.9, 0.9),
            ),
            dismiss_methods: DismissMethods::TRAILING_BUTTON | DismissMethods::PULL_DOWN,
            pull_down_dismiss_distance: DismissDistance::FractionOfMin(0.1),
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            drag_animation: BasicAnimation::drag_follow(),
            snap_animation: BasicAnimation::ease_out(Duration::from_millis(200)),
            animations: LifecycleAnimations {
                gesture_dismiss: Some(BasicAnimation::ease_out(Duration::from_millis(100))),
                ..LifecycleAnimations::default()
            },
            content_safe_area_edges: Edges::BOTTOM,
            autoresizes_content: false,
            resign_focus_on_orientation_change: true,
        }
    }
}

impl BottomSheetConfig {
    #[must_use]
    pub fn heights(mut self, heights: Orientational<Detents>) -> Self {
        self.heights = heights;
        self
    }

    #[must_use]
    pub fn width(mut self, width: Orientational<SizeSpec>) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn dismiss_methods(mut self, methods: DismissMethods) -> Self {
        self.dismiss_methods = methods;
        self
    }

    #[must_use]
    pub fn pull_down_dismiss_distance(mut self, distance: DismissDistance) -> Self {
        self.pull_down_dismiss_distance = distance;
        self
    }

    #[must_use]
    pub fn velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn content_safe_area_edges(mut self, edges: Edges) -> Self {
        self.content_safe_area_edges = edges;
        self
    }

    #[must_use]
    pub fn autoresizes_content(mut self, autoresizes: bool) -> Self {
        self.autoresizes_content = autoresizes;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heights.portrait.validate()?;
        self.heights.landscape.validate()?;
        self.width.portrait.validate("bottom_sheet.width.portrait")?;
        self.width.landscape.validate("bottom_sheet.width.landscape")?;
        self.pull_down_dismiss_distance.validate()?;
        modalkit_core::error::check_dimension("bottom_sheet.velocity_threshold", self.velocity_threshold)
            .map(drop)
    }
}

/// A presented bottom sheet.
#[derive(Debug, Clone)]
pub struct BottomSheet {
    config: BottomSheetConfig,
    container: ContainerGeometry,
    detents: ResolvedDetents,
    width: f64,
    offset: AnimatedValue,
    drag: DragEngine,
}

impl BottomSheet {
    #[must_use]
    pub fn new(config: BottomSheetConfig) -> Self {
        Self {
            config,
            container: ContainerGeometry::default(),
            detents: ResolvedDetents::default(),
            width: 0.0,
            offset: AnimatedValue::new(0.0),
            drag: DragEngine::new(Axis::Vertical),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &BottomSheetConfig {
        &self.config
    }

    /// Detents resolved against the current container.
    #[must_use]
    pub fn detents(&self) -> &ResolvedDetents {
        &self.detents
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Displayed offset from the container top at `now`.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f64 {
        self.offset.value_at(now)
    }

    /// Offset the sheet is settling at.
    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    /// Detent the sheet rests at, if any.
    #[must_use]
    pub fn current_detent(&self) -> Option<Detent> {
        self.detents.detent_at(self.offset.target())
    }

    /// Visible sheet height at `now`.
    #[must_use]
    pub fn visible_height(&self, now: Instant) -> f64 {
        (self.detents.container_height - self.offset(now)).max(0.0)
    }

    /// Height to lay content out at.
    #[must_use]
    pub fn content_height(&self, now: Instant) -> f64 {
        if self.config.autoresizes_content {
            self.visible_height(now)
        } else {
            self.detents.max
        }
    }

    /// Safe-area insets applied to content.
    #[must_use]
    pub fn content_insets(&self) -> Insets {
        self.container
            .safe_area
            .masked(self.config.content_safe_area_edges)
    }

    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.config
            .heights
            .current(self.container.orientation())
            .is_resizable()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- Internals ---

    fn pull_down_enabled(&self) -> bool {
        self.config.dismiss_methods.contains(DismissMethods::PULL_DOWN)
    }

    fn bounds(&self) -> OffsetBounds {
        let bounds = OffsetBounds::new(self.detents.max_offset(), self.detents.min_offset());
        if self.pull_down_enabled() {
            bounds.with_dismiss_limit(self.detents.container_height)
        } else {
            bounds
        }
    }

    fn policy(&self) -> SnapPolicy {
        let distance = self
            .pull_down_enabled()
            .then(|| self.config.pull_down_dismiss_distance.resolve(self.detents.min));
        SnapPolicy::new(self.config.velocity_threshold, distance)
    }

    fn layout(&mut self, container: ContainerGeometry) {
        self.container = container;
        let orientation = container.orientation();
        self.detents = self
            .config
            .heights
            .current(orientation)
            .resolve(container.size.height);
        self.width = self
            .config
            .width
            .current(orientation)
            .resolve(container.size.width);
    }

    fn drag_changed(&mut self, sample: &DragSample, now: Instant) -> SurfaceResponse {
        if !self.is_resizable() && !self.pull_down_enabled() {
            return SurfaceResponse::Ignored;
        }
        let bounds = self.bounds();
        let offset = self.drag.changed(sample, self.offset.target(), &bounds);
        self.offset.set(offset, self.config.drag_animation, now);
        SurfaceResponse::Handled
    }

    fn drag_ended(&mut self, sample: &DragSample, now: Instant) -> SurfaceResponse {
        let bounds = self.bounds();
        let Some(release) = self.drag.ended(sample, &bounds) else {
            return SurfaceResponse::Ignored;
        };
        match resolve_resizable(&release, &self.detents, &self.policy()) {
            SnapAction::SnapTo(target) => {
                tracing::debug!(
                    offset = release.offset,
                    velocity = ?release.velocity,
                    target,
                    "bottom sheet snapped"
                );
                self.offset.set(target, self.config.snap_animation, now);
                SurfaceResponse::Handled
            }
            SnapAction::Dismiss => SurfaceResponse::Dismiss(DismissTrigger::PullDown),
        }
    }
}

impl Default for BottomSheet {
    fn default() -> Self {
        Self::new(BottomSheetConfig::default())
    }
}

impl PresentedSurface for BottomSheet {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::BottomSheet
    }

    fn animations(&self) -> LifecycleAnimations {
        self.config.animations
    }

    fn handle_event(&mut self, event: &SurfaceEvent, ctx: &SurfaceContext<'_>) -> SurfaceResponse {
        let methods = self.config.dismiss_methods;
        match event {
            SurfaceEvent::DragChanged(sample) => self.drag_changed(sample, ctx.now),
            SurfaceEvent::DragEnded(sample) => self.drag_ended(sample, ctx.now),
            SurfaceEvent::DragCancelled => match self.drag.cancel() {
                Some(origin) => {
                    self.offset.set(origin, self.config.snap_animation, ctx.now);
                    SurfaceResponse::Handled
                }
                None => SurfaceResponse::Ignored,
            },
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
        self.layout(ctx.container);
        self.offset.jump(self.detents.ideal_offset());
    }

    fn container_changed(&mut self, change: &ContainerChange, ctx: &SurfaceContext<'_>) -> bool {
        self.layout(ctx.container);
        if change.size_changed {
            self.drag.cancel();
            self.offset.jump(self.detents.ideal_offset());
            tracing::debug!(
                id = ctx.id,
                ideal_offset = self.detents.ideal_offset(),
                "bottom sheet reset to ideal detent"
            );
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
