#![forbid(unsafe_code)]

//! Deferred single-threaded tasks.
//!
//! The [`Scheduler`] is the only place modalkit "waits": animation
//! completions and notification timeouts are tasks due at an instant, run
//! when the host advances the clock past that instant. No threads, no
//! wall-clock reads; the caller supplies `now`.
//!
//! # Invariants
//!
//! 1. Tasks run at most once.
//! 2. Due tasks run in due-time order; ties run in scheduling order.
//! 3. A task scheduled by a running task runs in the same `advance_to` pass
//!    if it is already due.
//! 4. A cancelled task never runs.
//! 5. The clock never moves backwards.
//!
//! # Failure Modes
//!
//! - `advance_to` with an earlier instant is a no-op returning 0.
//! - Cancelling an already-run or already-cancelled task is a no-op.
//! - A [`TaskHandle`] outliving its scheduler reports not pending.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use modalkit_core::{Duration, Instant};

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

struct Scheduled {
    id: TaskId,
    due: Instant,
    label: &'static str,
    task: Box<dyn FnOnce()>,
}

struct Inner {
    now: Instant,
    next_id: u64,
    tasks: Vec<Scheduled>,
}

impl Inner {
    /// Index of the earliest due task at or before `now`.
    fn next_due(&self, now: Instant) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(idx, _)| idx)
    }
}

/// Cloneable handle to a deferred-task queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("now", &inner.now)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}

impl Scheduler {
    /// Create a scheduler whose clock starts at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now,
                next_id: 1,
                tasks: Vec::new(),
            })),
        }
    }

    /// The scheduler's current time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.inner.borrow().now
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Run `task` once `delay` has elapsed from the scheduler's current time.
    ///
    /// The returned handle cancels the task when dropped; call
    /// [`TaskHandle::detach`] to let it run unattended.
    pub fn schedule_after(
        &self,
        delay: Duration,
        label: &'static str,
        task: impl FnOnce() + 'static,
    ) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = TaskId(inner.next_id);
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.tasks.push(Scheduled {
            id,
            due,
            label,
            task: Box::new(task),
        });
        tracing::trace!(task = id.0, label, delay_ms = delay.as_millis() as u64, "task scheduled");
        TaskHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
            detached: false,
        }
    }

    /// Move the clock to `now` and run every task due by then.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance_to(&self, now: Instant) -> usize {
        {
            let mut inner = self.inner.borrow_mut();
            if now < inner.now {
                return 0;
            }
            inner.now = now;
        }

        let mut ran = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                match inner.next_due(now) {
                    Some(idx) => inner.tasks.remove(idx),
                    None => break,
                }
            };
            tracing::trace!(task = next.id.0, label = next.label, "task fired");
            (next.task)();
            ran += 1;
        }
        ran
    }

    /// Drop every pending task without running it.
    pub fn clear(&self) {
        // Captured state is dropped after the borrow is released.
        let tasks = std::mem::take(&mut self.inner.borrow_mut().tasks);
        drop(tasks);
    }

    fn cancel(inner: &RefCell<Inner>, id: TaskId) -> bool {
        let removed = {
            let mut inner = inner.borrow_mut();
            let idx = inner.tasks.iter().position(|t| t.id == id);
            idx.map(|idx| inner.tasks.remove(idx))
        };
        removed.is_some()
    }
}

/// Handle to a scheduled task.
///
/// Dropping the handle cancels the task unless it was detached.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    id: TaskId,
    scheduler: Weak<RefCell<Inner>>,
    detached: bool,
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl TaskHandle {
    /// The task's id.
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Whether the task is still waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.scheduler
            .upgrade()
            .is_some_and(|inner| inner.borrow().tasks.iter().any(|t| t.id == self.id))
    }

    /// Cancel the task. Returns `true` if it was still pending.
    pub fn cancel(&self) -> bool {
        match self.scheduler.upgrade() {
            Some(inner) => Scheduler::cancel(&inner, self.id),
            None => false,
        }
    }

    /// Let the task run even after this handle is dropped.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.cancel();
        }
    }
}
