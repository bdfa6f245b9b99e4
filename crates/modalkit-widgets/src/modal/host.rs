#![forbid(unsafe_code)]

//! Presentation host: layered, z-ordered management of presented surfaces.
//!
//! The host owns every mounted surface, grouped into named layers. Each
//! surface runs its own [`PresentationLifecycle`]; the host keeps those
//! lifecycles in sync with the caller's [`PresentationTrigger`]s, routes
//! input, forwards container changes, and unmounts surfaces once their exit
//! transition completes.
//!
//! # Invariants
//!
//! - Layers draw in declaration order; the default layer is always first.
//! - Within a layer, surfaces draw in presentation order.
//! - Z-indices are derived from layer index and position, so they are
//!   strictly increasing in draw order however many cycles have run (up to
//!   10 000 simultaneous surfaces per layer).
//! - An id is mounted at most once across all layers. Presenting an id
//!   that is still dismissing is deferred until its cycle reaches `Hidden`;
//!   presenting an id that is presenting or presented is a no-op.
//! - If the caller raises a flag again while its surface animates out, the
//!   same surface starts a new cycle instead of unmounting.
//! - A surface is removed only after its exit transition completes, and
//!   the registry then records it as not presented.
//!
//! # Failure Modes
//!
//! - `present` with an inactive trigger, a presenting or presented id, or
//!   an undeclared layer returns `false`.
//! - `dismiss`/`handle_event` for an unknown id return `false`.
//!
//! # Example
//!
//! ```ignore
//! let mut host = PresentationHost::new(scheduler, registry, container);
//! host.declare_layer("toasts");
//!
//! let flag = Observable::new(true);
//! host.present(Presentation::new("logout", PresentationTrigger::flag(&flag), alert));
//!
//! for event in host.update(now) {
//!     // HostEvent::Presented { .. } once the appear transition completes
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use modalkit_core::{ContainerGeometry, Instant, SurfaceEvent};
use modalkit_runtime::{PresentationRegistry, Scheduler};

use super::lifecycle::{
    ButtonAction, DismissTrigger, LifecycleAnimations, LifecycleEvent, PresentationLifecycle,
    PresentationPhase,
};
use super::trigger::PresentationTrigger;

/// Id of the layer that always exists.
pub const DEFAULT_LAYER: &str = "default";

/// Base z-index for presented surfaces.
const BASE_Z: u32 = 1000;

/// Z-index span reserved per layer.
const LAYER_Z_SPAN: u32 = 100_000;

/// Z-index increment between surfaces in a layer.
const Z_INCREMENT: u32 = 10;

/// Broad category of a presented surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Alert,
    Modal,
    BottomSheet,
    SideBar,
    Notification,
    Custom,
}

/// What a surface sees while handling a hook or an event.
#[derive(Debug)]
pub struct SurfaceContext<'a> {
    pub id: &'a str,
    pub container: ContainerGeometry,
    pub now: Instant,
    pub scheduler: &'a Scheduler,
    pub trigger: &'a PresentationTrigger,
}

/// A surface's answer to an input event.
#[derive(Clone)]
pub enum SurfaceResponse {
    Ignored,
    Handled,
    Dismiss(DismissTrigger),
    /// Dismiss, then run the action once the exit transition completes.
    DismissThen(DismissTrigger, ButtonAction),
}

impl fmt::Debug for SurfaceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("Ignored"),
            Self::Handled => f.write_str("Handled"),
            Self::Dismiss(trigger) => f.debug_tuple("Dismiss").field(trigger).finish(),
            Self::DismissThen(trigger, _) => f.debug_tuple("DismissThen").field(trigger).finish(),
        }
    }
}

/// Geometry differences reported to surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerChange {
    pub size_changed: bool,
    pub orientation_changed: bool,
    pub safe_area_changed: bool,
}

impl ContainerChange {
    #[must_use]
    pub fn between(previous: &ContainerGeometry, next: &ContainerGeometry) -> Self {
        Self {
            size_changed: previous.size != next.size,
            orientation_changed: previous.orientation() != next.orientation(),
            safe_area_changed: previous.safe_area != next.safe_area,
        }
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.size_changed || self.orientation_changed || self.safe_area_changed)
    }
}

/// Content the host can present.
///
/// Hooks run in this order per cycle: `mounted`, `presented`,
/// `will_dismiss`, `dismissed`. `container_changed` and `handle_event` may
/// run at any point in between.
pub trait PresentedSurface: Any {
    fn kind(&self) -> SurfaceKind;

    /// Appear/disappear animations for this surface.
    fn animations(&self) -> LifecycleAnimations;

    /// Handle an input event routed to this surface.
    fn handle_event(&mut self, event: &SurfaceEvent, ctx: &SurfaceContext<'_>) -> SurfaceResponse;

    /// Called once when the surface is mounted, before appear starts.
    fn mounted(&mut self, _ctx: &SurfaceContext<'_>) {}

    /// Called once when appear completes. `ctx.now` is the instant the
    /// appear transition ended, which may precede the scheduler's time when
    /// updates run late.
    fn presented(&mut self, _ctx: &SurfaceContext<'_>) {}

    /// Called once when disappear starts.
    fn will_dismiss(&mut self, _ctx: &SurfaceContext<'_>, _trigger: DismissTrigger) {}

    /// Called once when disappear completes, just before unmounting.
    fn dismissed(&mut self) {}

    /// Container geometry changed. Returns `true` to request that
    /// keyboard focus be resigned.
    fn container_changed(&mut self, _change: &ContainerChange, _ctx: &SurfaceContext<'_>) -> bool {
        false
    }

    /// Trigger to report when the caller's flag is cleared externally.
    fn binding_dismiss_trigger(&self) -> DismissTrigger {
        DismissTrigger::Binding
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A request to present a surface.
pub struct Presentation {
    id: String,
    layer: String,
    trigger: PresentationTrigger,
    surface: Box<dyn PresentedSurface>,
    on_present: Option<Box<dyn FnMut()>>,
    on_dismiss: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("id", &self.id)
            .field("layer", &self.layer)
            .field("kind", &self.surface.kind())
            .finish()
    }
}

impl Presentation {
    /// Present `surface` under `id` in the default layer.
    pub fn new(
        id: impl Into<String>,
        trigger: PresentationTrigger,
        surface: impl PresentedSurface,
    ) -> Self {
        Self {
            id: id.into(),
            layer: DEFAULT_LAYER.to_owned(),
            trigger,
            surface: Box::new(surface),
            on_present: None,
            on_dismiss: None,
        }
    }

    /// Present into a named layer.
    #[must_use]
    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Run `callback` once appear completes.
    #[must_use]
    pub fn on_present(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_present = Some(Box::new(callback));
        self
    }

    /// Run `callback` once disappear completes.
    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(callback));
        self
    }
}

/// Lifecycle milestones reported by [`PresentationHost::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Presented {
        layer: String,
        id: String,
    },
    Dismissed {
        layer: String,
        id: String,
        trigger: DismissTrigger,
    },
    /// A surface asked for keyboard focus to be resigned.
    ResignFocus {
        id: String,
    },
}

/// One mounted surface, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEntry<'a> {
    pub layer: &'a str,
    pub id: &'a str,
    pub z_index: u32,
    pub kind: SurfaceKind,
    pub phase: PresentationPhase,
}

/// Time and services shared by one host operation.
struct Env<'a> {
    container: ContainerGeometry,
    scheduler: &'a Scheduler,
    now: Instant,
}

/// Z-index of the surface at `position` in the layer at `layer_idx`.
fn z_index(layer_idx: usize, position: usize) -> u32 {
    let layer = u32::try_from(layer_idx).unwrap_or(u32::MAX);
    let position = u32::try_from(position).unwrap_or(u32::MAX);
    let offset = position
        .saturating_mul(Z_INCREMENT)
        .min(LAYER_Z_SPAN - Z_INCREMENT);
    BASE_Z
        .saturating_add(layer.saturating_mul(LAYER_Z_SPAN))
        .saturating_add(offset)
}

struct ActiveSurface {
    id: String,
    trigger: PresentationTrigger,
    surface: Box<dyn PresentedSurface>,
    lifecycle: PresentationLifecycle,
}

macro_rules! surface_context {
    ($entry:expr, $env:expr) => {
        SurfaceContext {
            id: &$entry.id,
            container: $env.container,
            now: $env.now,
            scheduler: $env.scheduler,
            trigger: &$entry.trigger,
        }
    };
}

impl ActiveSurface {
    fn is_interactive(&self) -> bool {
        matches!(
            self.lifecycle.phase(),
            PresentationPhase::Presenting | PresentationPhase::Presented
        )
    }

    /// Start (or latch) a dismissal and clear the caller's flag.
    fn begin_dismiss(&mut self, trigger: DismissTrigger, completion: Option<ButtonAction>, env: &Env<'_>) -> bool {
        match self.lifecycle.phase() {
            PresentationPhase::Presenting => {
                if !self.lifecycle.dismiss(trigger, env.now) {
                    return false;
                }
                tracing::debug!(id = %self.id, ?trigger, "dismiss latched until presented");
            }
            PresentationPhase::Presented => {
                let ctx = surface_context!(self, env);
                self.surface.will_dismiss(&ctx, trigger);
                self.lifecycle.dismiss(trigger, env.now);
                tracing::debug!(id = %self.id, ?trigger, "dismiss started");
            }
            PresentationPhase::Hidden | PresentationPhase::Dismissing => return false,
        }
        if let Some(action) = completion {
            self.lifecycle.set_completion(action);
        }
        self.trigger.dismiss();
        true
    }

    /// Mirror the caller's flag into the registry and the lifecycle.
    fn sync(&mut self, registry: &PresentationRegistry, env: &Env<'_>) {
        let presented = self.trigger.is_presented();
        registry.set_presented(&self.id, presented);
        if let Some(payload) = self.trigger.payload() {
            registry.set_shared(&self.id, payload);
        }
        if !presented && self.is_interactive() {
            let trigger = self.surface.binding_dismiss_trigger();
            self.begin_dismiss(trigger, None, env);
        }
    }

    fn step(&mut self, layer: &str, env: &Env<'_>) -> Option<HostEvent> {
        let settled_at = self.lifecycle.transition_end();
        match self.lifecycle.tick(env.now)? {
            LifecycleEvent::Presented => {
                let mut ctx = surface_context!(self, env);
                ctx.now = settled_at.map_or(env.now, |at| at.min(env.now));
                self.surface.presented(&ctx);
                tracing::debug!(layer, id = %self.id, "presented");
                if let Some(trigger) = self.lifecycle.take_pending_dismiss() {
                    self.begin_dismiss(trigger, None, env);
                }
                Some(HostEvent::Presented {
                    layer: layer.to_owned(),
                    id: self.id.clone(),
                })
            }
            LifecycleEvent::Dismissed => {
                self.surface.dismissed();
                let trigger = self
                    .lifecycle
                    .dismiss_trigger()
                    .unwrap_or(DismissTrigger::Binding);
                tracing::debug!(layer, id = %self.id, ?trigger, "dismissed");
                Some(HostEvent::Dismissed {
                    layer: layer.to_owned(),
                    id: self.id.clone(),
                    trigger,
                })
            }
        }
    }

    /// Start a new cycle on this surface after its exit completed with the
    /// caller's state reading presented again.
    fn represent(&mut self, registry: &PresentationRegistry, env: &Env<'_>) {
        registry.set_presented(&self.id, true);
        let ctx = surface_context!(self, env);
        self.surface.mounted(&ctx);
        self.lifecycle.present(env.now);
        tracing::debug!(id = %self.id, "presenting again");
    }

    fn handle(&mut self, event: &SurfaceEvent, env: &Env<'_>) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let ctx = surface_context!(self, env);
        match self.surface.handle_event(event, &ctx) {
            SurfaceResponse::Ignored => false,
            SurfaceResponse::Handled => true,
            SurfaceResponse::Dismiss(trigger) => self.begin_dismiss(trigger, None, env),
            SurfaceResponse::DismissThen(trigger, action) => {
                self.begin_dismiss(trigger, Some(action), env)
            }
        }
    }
}

struct Layer {
    id: String,
    surfaces: Vec<ActiveSurface>,
}

impl Layer {
    fn new(id: String) -> Self {
        Self {
            id,
            surfaces: Vec::new(),
        }
    }
}

/// Owner of every presented surface.
pub struct PresentationHost {
    layers: Vec<Layer>,
    container: ContainerGeometry,
    scheduler: Scheduler,
    registry: PresentationRegistry,
    pending_events: Vec<HostEvent>,
    /// Presentations waiting for a dismissing surface with the same id.
    deferred: Vec<Presentation>,
}

impl fmt::Debug for PresentationHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationHost")
            .field("layers", &self.layer_ids())
            .field("surfaces", &self.len())
            .field("container", &self.container)
            .finish()
    }
}

impl PresentationHost {
    /// Create a host with only the default layer.
    #[must_use]
    pub fn new(scheduler: Scheduler, registry: PresentationRegistry, container: ContainerGeometry) -> Self {
        Self {
            layers: vec![Layer::new(DEFAULT_LAYER.to_owned())],
            container,
            scheduler,
            registry,
            pending_events: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Declare a layer drawn above every existing layer.
    ///
    /// Returns `false` if the layer already exists.
    pub fn declare_layer(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.layer_index(&id).is_some() {
            return false;
        }
        tracing::debug!(layer = %id, "layer declared");
        self.layers.push(Layer::new(id));
        true
    }

    fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    fn entry(&self, id: &str) -> Option<&ActiveSurface> {
        self.layers
            .iter()
            .flat_map(|l| l.surfaces.iter())
            .find(|s| s.id == id)
    }

    // --- Presentation ---

    /// Mount and start presenting a surface.
    ///
    /// The appear transition starts at the scheduler's current time. If the
    /// id is still dismissing, the presentation is held and mounted by the
    /// [`update`](Self::update) that unmounts the old surface; this returns
    /// `true`.
    pub fn present(&mut self, presentation: Presentation) -> bool {
        if !presentation.trigger.is_presented() {
            return false;
        }
        match self.entry(&presentation.id).map(|s| s.lifecycle.phase()) {
            Some(PresentationPhase::Dismissing) => {
                tracing::debug!(id = %presentation.id, "present deferred until dismissal completes");
                let id = presentation.id.clone();
                self.deferred.retain(|p| p.id != id);
                self.deferred.push(presentation);
                return true;
            }
            Some(_) => return false,
            None => {}
        }

        let Presentation {
            id,
            layer,
            trigger,
            mut surface,
            on_present,
            on_dismiss,
        } = presentation;

        let Some(layer_idx) = self.layer_index(&layer) else {
            tracing::debug!(layer = %layer, id = %id, "present into undeclared layer");
            return false;
        };

        self.registry.claim(&id, Some(&layer));
        self.registry.set_presented(&id, true);
        match trigger.payload() {
            Some(payload) => self.registry.set_shared(&id, payload),
            None => self.registry.clear_payload(&id),
        }

        let now = self.scheduler.now();
        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        let mut lifecycle = PresentationLifecycle::new(surface.animations());
        if let Some(callback) = on_present {
            lifecycle.set_on_present(callback);
        }
        if let Some(callback) = on_dismiss {
            lifecycle.set_on_dismiss(callback);
        }
        surface.mounted(&SurfaceContext {
            id: &id,
            container: env.container,
            now,
            scheduler: env.scheduler,
            trigger: &trigger,
        });
        lifecycle.present(now);

        let layer = &mut self.layers[layer_idx];
        let z_index = z_index(layer_idx, layer.surfaces.len());
        tracing::debug!(layer = %layer.id, id = %id, z_index, kind = ?surface.kind(), "presenting");
        layer.surfaces.push(ActiveSurface {
            id,
            trigger,
            surface,
            lifecycle,
        });
        true
    }

    /// Dismiss the surface mounted under `id`.
    ///
    /// A presentation deferred behind the exit of `id` is dropped and its
    /// trigger cleared.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.deferred.len();
        self.deferred.retain(|p| {
            let keep = p.id != id;
            if !keep {
                p.trigger.dismiss();
            }
            keep
        });
        let dropped_deferred = self.deferred.len() != before;

        let now = self.scheduler.now();
        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        self.layers
            .iter_mut()
            .flat_map(|l| l.surfaces.iter_mut())
            .find(|s| s.id == id)
            .is_some_and(|entry| entry.begin_dismiss(DismissTrigger::External, None, &env))
            || dropped_deferred
    }

    /// Advance to `now`: run due tasks, sync triggers, complete transitions,
    /// unmount surfaces whose exit finished, and mount deferred
    /// presentations.
    pub fn update(&mut self, now: Instant) -> Vec<HostEvent> {
        let _span = tracing::debug_span!("host_update", surfaces = self.len()).entered();
        self.scheduler.advance_to(now);
        let now = now.max(self.scheduler.now());

        let mut events = std::mem::take(&mut self.pending_events);
        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        let deferred_ids: Vec<String> = self.deferred.iter().map(|p| p.id.clone()).collect();
        for layer in &mut self.layers {
            for entry in &mut layer.surfaces {
                entry.sync(&self.registry, &env);
                let Some(event) = entry.step(&layer.id, &env) else {
                    continue;
                };
                let dismissed = matches!(event, HostEvent::Dismissed { .. });
                events.push(event);
                if !dismissed {
                    continue;
                }
                if entry.trigger.is_presented() && !deferred_ids.contains(&entry.id) {
                    entry.represent(&self.registry, &env);
                } else {
                    self.registry.set_presented(&entry.id, false);
                }
            }
            layer.surfaces.retain(|s| s.lifecycle.phase().is_active());
        }
        self.present_deferred();
        events
    }

    fn present_deferred(&mut self) {
        for presentation in std::mem::take(&mut self.deferred) {
            if self.is_active(&presentation.id) {
                self.deferred.push(presentation);
                continue;
            }
            let id = presentation.id.clone();
            if !self.present(presentation) {
                tracing::debug!(id = %id, "deferred present dropped");
            }
        }
    }

    // --- Input ---

    /// Route an event to the surface mounted under `id`.
    ///
    /// Returns `true` if the surface consumed it.
    pub fn handle_event(&mut self, id: &str, event: &SurfaceEvent, now: Instant) -> bool {
        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        self.layers
            .iter_mut()
            .flat_map(|l| l.surfaces.iter_mut())
            .find(|s| s.id == id)
            .is_some_and(|entry| entry.handle(event, &env))
    }

    /// Route an event to the topmost surface that is not dismissing.
    pub fn handle_top_event(&mut self, event: &SurfaceEvent, now: Instant) -> bool {
        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        self.layers
            .iter_mut()
            .rev()
            .flat_map(|l| l.surfaces.iter_mut().rev())
            .find(|s| s.is_interactive())
            .is_some_and(|entry| entry.handle(event, &env))
    }

    /// Replace the container geometry and let every mounted surface react.
    ///
    /// Focus-resign requests are reported by the next [`update`](Self::update).
    pub fn set_container(&mut self, geometry: ContainerGeometry, now: Instant) -> ContainerChange {
        let change = ContainerChange::between(&self.container, &geometry);
        if change.is_empty() {
            return change;
        }
        self.container = geometry;
        tracing::debug!(
            width = geometry.size.width,
            height = geometry.size.height,
            orientation = ?geometry.orientation(),
            "container changed"
        );

        let env = Env {
            container: self.container,
            scheduler: &self.scheduler,
            now,
        };
        for entry in self.layers.iter_mut().flat_map(|l| l.surfaces.iter_mut()) {
            let ctx = surface_context!(entry, env);
            if entry.surface.container_changed(&change, &ctx) {
                self.pending_events.push(HostEvent::ResignFocus {
                    id: entry.id.clone(),
                });
            }
        }
        change
    }

    // --- Queries ---

    #[must_use]
    pub fn container(&self) -> ContainerGeometry {
        self.container
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn registry(&self) -> &PresentationRegistry {
        &self.registry
    }

    /// Declared layer ids, bottom to top.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Whether `id` is mounted in any phase.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    /// Phase of `id`; `Hidden` if not mounted.
    #[must_use]
    pub fn phase(&self, id: &str) -> PresentationPhase {
        self.entry(id)
            .map_or(PresentationPhase::Hidden, |s| s.lifecycle.phase())
    }

    /// Presentation progress of `id` in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, id: &str, now: Instant) -> f64 {
        self.entry(id).map_or(0.0, |s| s.lifecycle.progress(now))
    }

    /// Whether content of `id` should be drawn as presented.
    #[must_use]
    pub fn is_internally_presented(&self, id: &str) -> bool {
        self.entry(id)
            .is_some_and(|s| s.lifecycle.is_internally_presented())
    }

    /// Ids mounted in `layer`, in presentation order.
    #[must_use]
    pub fn active_ids(&self, layer: &str) -> Vec<&str> {
        self.layer_index(layer)
            .map(|idx| {
                self.layers[idx]
                    .surfaces
                    .iter()
                    .map(|s| s.id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every mounted surface, bottom to top.
    #[must_use]
    pub fn draw_order(&self) -> Vec<DrawEntry<'_>> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(layer_idx, layer)| {
                layer.surfaces.iter().enumerate().map(move |(position, s)| DrawEntry {
                    layer: &layer.id,
                    id: &s.id,
                    z_index: z_index(layer_idx, position),
                    kind: s.surface.kind(),
                    phase: s.lifecycle.phase(),
                })
            })
            .collect()
    }

    /// Typed access to a mounted surface.
    #[must_use]
    pub fn surface<T: PresentedSurface>(&self, id: &str) -> Option<&T> {
        self.entry(id)
            .and_then(|s| s.surface.as_any().downcast_ref::<T>())
    }

    /// Typed mutable access to a mounted surface.
    #[must_use]
    pub fn surface_mut<T: PresentedSurface>(&mut self, id: &str) -> Option<&mut T> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.surfaces.iter_mut())
            .find(|s| s.id == id)
            .and_then(|s| s.surface.as_any_mut().downcast_mut::<T>())
    }

    /// Last payload cached for `id`, surviving the caller clearing it.
    #[must_use]
    pub fn payload<T: Any>(&self, id: &str) -> Option<Rc<T>> {
        self.registry.get_as::<T>(id)
    }

    /// Number of mounted surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.iter().map(|l| l.surfaces.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.surfaces.is_empty())
    }
}
