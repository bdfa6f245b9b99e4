//! End-to-end presentation cycles driven through the host with a
//! deterministic clock.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use modalkit_core::{
    ConfigError, ContainerGeometry, DragSample, Duration, Insets, Instant, Size, SurfaceEvent,
};
use modalkit_runtime::{Observable, PresentationRegistry, Scheduler};
use modalkit_widgets::gesture::{DetentUnit, Detents};
use modalkit_widgets::modal::{
    DEFAULT_LAYER, DismissTrigger, HostEvent, Orientational, Presentation, PresentationHost,
    PresentationPhase, PresentationTrigger,
};
use modalkit_widgets::surface::{
    Alert, AlertButton, BottomSheet, BottomSheetConfig, DismissDistance, Notification,
    NotificationConfig,
};

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Default appear/disappear duration for sheets and notifications.
const TRANSITION: u64 = 300;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn portrait() -> ContainerGeometry {
    ContainerGeometry::new(Size::new(400.0, 800.0), Insets::new(47.0, 0.0, 34.0, 0.0))
}

fn landscape() -> ContainerGeometry {
    ContainerGeometry::new(Size::new(800.0, 400.0), Insets::new(0.0, 47.0, 21.0, 47.0))
}

fn host(t0: Instant) -> PresentationHost {
    PresentationHost::new(Scheduler::new(t0), PresentationRegistry::new(), portrait())
}

/// Detent offsets in the portrait container: min 600, ideal 400, max 100.
fn sheet() -> BottomSheet {
    BottomSheet::new(
        BottomSheetConfig::default()
            .heights(Orientational::uniform(Detents::points(200.0, 400.0, 700.0)))
            .pull_down_dismiss_distance(DismissDistance::Points(20.0)),
    )
}

fn sheet_offset(host: &PresentationHost) -> f64 {
    host.surface::<BottomSheet>("sheet")
        .map(BottomSheet::target_offset)
        .unwrap_or(f64::NAN)
}

/// Present the test sheet and run its appear transition to completion.
fn presented_sheet(t0: Instant) -> (PresentationHost, Observable<bool>) {
    let mut host = host(t0);
    let flag = Observable::new(true);
    assert!(host.present(Presentation::new("sheet", PresentationTrigger::flag(&flag), sheet())));
    host.update(t0 + ms(TRANSITION));
    assert_eq!(host.phase("sheet"), PresentationPhase::Presented);
    (host, flag)
}

/// A drag whose last 500ms are motionless, so the release velocity is zero.
fn slow_drag(host: &mut PresentationHost, dy: f64, at: Instant) -> bool {
    host.handle_event("sheet", &SurfaceEvent::DragChanged(DragSample::vertical(dy, at)), at);
    let end = at + ms(500);
    host.handle_event("sheet", &SurfaceEvent::DragEnded(DragSample::vertical(dy, end)), end)
}

/// A drag released at 1000pt/s in the direction of `flick`.
fn fast_drag(host: &mut PresentationHost, dy: f64, flick: f64, at: Instant) -> bool {
    host.handle_event("sheet", &SurfaceEvent::DragChanged(DragSample::vertical(dy, at)), at);
    let end = at + ms(10);
    let released = dy + 10.0 * flick.signum();
    host.handle_event("sheet", &SurfaceEvent::DragEnded(DragSample::vertical(released, end)), end)
}

#[test]
fn presenting_the_same_id_twice_is_a_no_op() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    let presents = Rc::new(Cell::new(0));

    for _ in 0..2 {
        let count = Rc::clone(&presents);
        host.present(
            Presentation::new("sheet", PresentationTrigger::flag(&flag), sheet())
                .on_present(move || count.set(count.get() + 1)),
        );
    }
    assert_eq!(host.len(), 1);
    assert_eq!(host.active_ids(DEFAULT_LAYER), vec!["sheet"]);

    host.update(t0 + ms(TRANSITION));
    let count = Rc::clone(&presents);
    assert!(!host.present(
        Presentation::new("sheet", PresentationTrigger::flag(&flag), sheet())
            .on_present(move || count.set(count.get() + 1)),
    ));
    host.update(t0 + ms(2 * TRANSITION));
    assert_eq!(presents.get(), 1);
    assert_eq!(host.len(), 1);
}

#[test]
fn alert_cycle_fires_callbacks_once_and_in_order() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    let order = Rc::new(RefCell::new(Vec::new()));

    let (a, p, d) = (Rc::clone(&order), Rc::clone(&order), Rc::clone(&order));
    let alert = Alert::new(
        "Delete draft?",
        "This cannot be undone.",
        vec![
            AlertButton::destructive("Delete", move || a.borrow_mut().push("action")),
            AlertButton::cancel("Keep"),
        ],
    );
    host.present(
        Presentation::new("alert", PresentationTrigger::flag(&flag), alert)
            .on_present(move || p.borrow_mut().push("present"))
            .on_dismiss(move || d.borrow_mut().push("dismiss")),
    );

    // Appear takes 200ms, disappear 150ms.
    host.update(t0 + ms(200));
    assert!(host.handle_event("alert", &SurfaceEvent::ButtonTap(0), t0 + ms(250)));
    assert!(!flag.get());
    assert!(!host.handle_event("alert", &SurfaceEvent::ButtonTap(0), t0 + ms(260)));

    host.update(t0 + ms(300));
    assert_eq!(*order.borrow(), vec!["present"]);

    let events = host.update(t0 + ms(400));
    assert_eq!(
        events,
        vec![HostEvent::Dismissed {
            layer: DEFAULT_LAYER.into(),
            id: "alert".into(),
            trigger: DismissTrigger::Button,
        }]
    );
    host.update(t0 + ms(1_000));
    assert_eq!(*order.borrow(), vec!["present", "action", "dismiss"]);
    assert!(host.is_empty());
}

#[test]
fn misordered_detents_are_rejected() {
    assert_eq!(
        Detents::try_new(DetentUnit::Points, 10.0, 5.0, 20.0),
        Err(ConfigError::InvalidDetents {
            min: 10.0,
            ideal: 5.0,
            max: 20.0
        })
    );
}

#[test]
#[should_panic(expected = "min <= ideal <= max")]
fn misordered_detents_panic_in_code() {
    let _ = Detents::points(10.0, 5.0, 20.0);
}

#[test]
fn fast_release_between_min_and_ideal_follows_direction() {
    let t0 = Instant::now();

    let (mut host, _flag) = presented_sheet(t0);
    assert!(fast_drag(&mut host, 90.0, 1.0, t0 + ms(400)));
    assert_eq!(sheet_offset(&host), 600.0);

    let (mut host, _flag) = presented_sheet(t0);
    assert!(fast_drag(&mut host, 110.0, -1.0, t0 + ms(400)));
    assert_eq!(sheet_offset(&host), 400.0);
}

#[test]
fn slow_release_picks_nearest_detent() {
    let t0 = Instant::now();
    for (dy, expected) in [(-140.0, 400.0), (-160.0, 100.0), (-150.0, 400.0)] {
        let (mut host, _flag) = presented_sheet(t0);
        assert!(slow_drag(&mut host, dy, t0 + ms(400)));
        assert_eq!(sheet_offset(&host), expected, "drag by {dy}");
    }
}

#[test]
fn pull_down_dismiss_distance_is_inclusive() {
    let t0 = Instant::now();

    let (mut host, flag) = presented_sheet(t0);
    slow_drag(&mut host, 200.0, t0 + ms(400));
    assert_eq!(sheet_offset(&host), 600.0);
    assert!(slow_drag(&mut host, 19.0, t0 + ms(1_000)));
    assert_eq!(sheet_offset(&host), 600.0);
    assert!(flag.get());

    let (mut host, flag) = presented_sheet(t0);
    slow_drag(&mut host, 200.0, t0 + ms(400));
    assert!(slow_drag(&mut host, 20.0, t0 + ms(1_000)));
    assert!(!flag.get());
    assert_eq!(host.phase("sheet"), PresentationPhase::Dismissing);
    let events = host.update(t0 + ms(1_500) + ms(100));
    assert!(matches!(
        events.as_slice(),
        [HostEvent::Dismissed {
            trigger: DismissTrigger::PullDown,
            ..
        }]
    ));
}

#[test]
fn notification_timeout_dismisses() {
    let t0 = Instant::now();
    let mut host = host(t0);
    host.declare_layer("toasts");
    let flag = Observable::new(true);
    host.present(
        Presentation::new("toast", PresentationTrigger::flag(&flag), Notification::default())
            .layer("toasts"),
    );
    host.update(t0 + ms(TRANSITION));
    assert!(host.surface::<Notification>("toast").is_some_and(Notification::is_timeout_pending));

    host.update(t0 + ms(TRANSITION + 4_999));
    assert_eq!(host.phase("toast"), PresentationPhase::Presented);
    host.update(t0 + ms(TRANSITION + 5_000));
    assert!(!flag.get());
    assert_eq!(host.phase("toast"), PresentationPhase::Dismissing);

    let events = host.update(t0 + ms(2 * TRANSITION + 5_000));
    assert_eq!(
        events,
        vec![HostEvent::Dismissed {
            layer: "toasts".into(),
            id: "toast".into(),
            trigger: DismissTrigger::Timeout,
        }]
    );
}

#[test]
fn late_update_does_not_extend_notification_timeout() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    host.present(Presentation::new("toast", PresentationTrigger::flag(&flag), Notification::default()));

    // The appear ended at TRANSITION but is only noticed 2s later.
    host.update(t0 + ms(TRANSITION + 2_000));
    assert_eq!(host.phase("toast"), PresentationPhase::Presented);
    host.update(t0 + ms(TRANSITION + 4_999));
    assert!(flag.get());
    host.update(t0 + ms(TRANSITION + 5_000));
    assert!(!flag.get());
    assert_eq!(host.phase("toast"), PresentationPhase::Dismissing);
}

#[test]
fn manual_dismiss_cancels_notification_timeout() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    let dismissals = Rc::new(Cell::new(0));
    let count = Rc::clone(&dismissals);
    host.present(
        Presentation::new("toast", PresentationTrigger::flag(&flag), Notification::default())
            .on_dismiss(move || count.set(count.get() + 1)),
    );
    host.update(t0 + ms(TRANSITION));
    assert_eq!(host.scheduler().pending(), 1);

    host.update(t0 + ms(1_000));
    assert!(host.dismiss("toast"));
    assert_eq!(host.scheduler().pending(), 0);
    host.update(t0 + ms(1_000 + TRANSITION));
    assert!(!host.is_active("toast"));

    // Well past the timeout deadline.
    let events = host.update(t0 + ms(10_000));
    assert!(events.is_empty());
    assert_eq!(dismissals.get(), 1);
}

#[test]
fn swiping_a_notification_reports_swipe() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    host.present(Presentation::new(
        "toast",
        PresentationTrigger::flag(&flag),
        Notification::new(NotificationConfig::default()),
    ));
    host.update(t0 + ms(TRANSITION));
    let at = t0 + ms(400);
    host.handle_event("toast", &SurfaceEvent::DragChanged(DragSample::vertical(-5.0, at)), at);
    let end = at + ms(10);
    assert!(host.handle_event("toast", &SurfaceEvent::DragEnded(DragSample::vertical(-15.0, end)), end));
    let events = host.update(end + ms(100));
    assert!(matches!(
        events.as_slice(),
        [HostEvent::Dismissed {
            trigger: DismissTrigger::Swipe,
            ..
        }]
    ));
    assert_eq!(host.scheduler().pending(), 0);
}

#[test]
fn rotation_mid_drag_resets_to_new_ideal() {
    let t0 = Instant::now();
    let mut host = host(t0);
    let flag = Observable::new(true);
    let sheet = BottomSheet::new(BottomSheetConfig::default().heights(Orientational::new(
        Detents::fraction(0.25, 0.5, 0.75),
        Detents::fraction(0.5, 0.8, 0.9),
    )));
    host.present(Presentation::new("sheet", PresentationTrigger::flag(&flag), sheet));
    host.update(t0 + ms(TRANSITION));
    assert_eq!(sheet_offset(&host), 400.0);

    let at = t0 + ms(400);
    host.handle_event("sheet", &SurfaceEvent::DragChanged(DragSample::vertical(-80.0, at)), at);
    assert_eq!(sheet_offset(&host), 320.0);

    let change = host.set_container(landscape(), at + ms(5));
    assert!(change.size_changed && change.orientation_changed);
    assert!((sheet_offset(&host) - 80.0).abs() < 1e-9);
    assert!(host.surface::<BottomSheet>("sheet").is_some_and(|s| !s.is_dragging()));

    // The stale gesture's end no longer has a session.
    let end = at + ms(20);
    assert!(!host.handle_event("sheet", &SurfaceEvent::DragEnded(DragSample::vertical(-90.0, end)), end));
    assert!((sheet_offset(&host) - 80.0).abs() < 1e-9);

    let events = host.update(at + ms(30));
    assert_eq!(events, vec![HostEvent::ResignFocus { id: "sheet".into() }]);
}

#[test]
fn item_payload_stays_readable_during_exit() {
    #[derive(Debug, Clone, PartialEq)]
    struct Draft {
        title: String,
    }

    let t0 = Instant::now();
    let mut host = host(t0);
    let item = Observable::new(Some(Draft {
        title: "Groceries".into(),
    }));
    host.present(Presentation::new("draft", PresentationTrigger::item(&item), sheet()));
    host.update(t0 + ms(TRANSITION));

    item.set(None);
    host.update(t0 + ms(TRANSITION + 10));
    assert_eq!(host.phase("draft"), PresentationPhase::Dismissing);
    assert_eq!(
        host.payload::<Draft>("draft").map(|d| d.title.clone()),
        Some("Groceries".to_owned())
    );
    host.update(t0 + ms(2 * TRANSITION + 10));
    assert!(!host.is_active("draft"));
    assert!(!host.registry().is_presented("draft"));
}

// ============================================================================
// Logging
// ============================================================================

/// Collects the message of every event emitted while installed.
#[derive(Clone, Default)]
struct CapturedMessages(Arc<Mutex<Vec<String>>>);

impl CapturedMessages {
    fn contains(&self, message: &str) -> bool {
        self.0.lock().unwrap().iter().any(|m| m == message)
    }
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for CapturedMessages {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.0.lock().unwrap().push(message);
    }
}

#[test]
fn presentation_milestones_are_traced() {
    let captured = CapturedMessages::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, || {
        let t0 = Instant::now();
        let mut host = host(t0);
        let flag = Observable::new(true);
        host.present(Presentation::new("toast", PresentationTrigger::flag(&flag), Notification::default()));
        host.update(t0 + ms(TRANSITION));
        host.update(t0 + ms(1_000));
        host.dismiss("toast");
        host.update(t0 + ms(1_000 + TRANSITION));
    });

    for message in [
        "presenting",
        "presented",
        "notification timeout armed",
        "notification timeout cancelled",
        "dismiss started",
        "dismissed",
    ] {
        assert!(captured.contains(message), "missing trace event {message:?}");
    }
}
