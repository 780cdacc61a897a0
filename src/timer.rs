//! Repeating and one-shot timers with cancel-on-drop handles.
//!
//! ARCHITECTURE
//! ============
//! The runtime owns one handle per running timer and replaces or drops it to
//! restart or cancel. In the browser the handles are `gloo-timers`
//! `Interval`/`Timeout`s. [`ManualScheduler`] runs the same contract on a
//! virtual clock so tests can step time deterministically.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Creates timers. Dropping the returned handle cancels the timer.
pub trait Scheduler {
    type Handle: 'static;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;
    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

// =============================================================================
// VIRTUAL CLOCK
// =============================================================================

enum Task {
    Repeat(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    due: Duration,
    period: Option<Duration>,
    // `None` while the task is running.
    task: Option<Task>,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

/// Single-threaded scheduler driven by [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

/// Handle for a [`ManualScheduler`] timer.
pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<Queue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        let removed = queue.borrow_mut().entries.remove(&self.id);
        drop(removed);
    }
}

impl std::fmt::Debug for ManualHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualHandle").field("id", &self.id).finish()
    }
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of live (not cancelled, not yet fired one-shot) timers.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due in
    /// order of due time.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some((id, task)) = self.take_due(target) {
            match task {
                Task::Once(task) => task(),
                Task::Repeat(mut task) => {
                    task();
                    // The task may have cancelled its own timer.
                    if let Some(entry) = self.queue.borrow_mut().entries.get_mut(&id) {
                        entry.task = Some(Task::Repeat(task));
                    }
                }
            }
        }
        self.queue.borrow_mut().now = target;
    }

    fn take_due(&self, target: Duration) -> Option<(u64, Task)> {
        let mut queue = self.queue.borrow_mut();
        let (id, due) = queue
            .entries
            .iter()
            .filter(|(_, e)| e.task.is_some() && e.due <= target)
            .min_by_key(|(id, e)| (e.due, **id))
            .map(|(id, e)| (*id, e.due))?;
        queue.now = due;
        let entry = queue.entries.get_mut(&id)?;
        let task = entry.task.take()?;
        match entry.period {
            Some(period) => entry.due = due + period,
            None => {
                queue.entries.remove(&id);
            }
        }
        Some((id, task))
    }

    fn insert(&self, delay: Duration, period: Option<Duration>, task: Task) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay;
        queue.entries.insert(id, Entry { due, period, task: Some(task) });
        ManualHandle { id, queue: Rc::downgrade(&self.queue) }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> ManualHandle {
        // A zero period would fire forever within one advance.
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Some(period), Task::Repeat(task))
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        self.insert(delay, None, Task::Once(task))
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "hydrate")]
pub use browser::{GlooHandle, GlooScheduler};

#[cfg(feature = "hydrate")]
mod browser {
    use std::time::Duration;

    use gloo_timers::callback::{Interval, Timeout};

    use super::Scheduler;

    /// `setInterval`/`setTimeout` scheduler.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooScheduler;

    /// Owns the gloo timer; dropping it clears the browser timer.
    pub enum GlooHandle {
        Interval(Interval),
        Timeout(Timeout),
    }

    fn millis(duration: Duration) -> u32 {
        u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
    }

    impl Scheduler for GlooScheduler {
        type Handle = GlooHandle;

        fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> GlooHandle {
            GlooHandle::Interval(Interval::new(millis(period), task))
        }

        fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> GlooHandle {
            GlooHandle::Timeout(Timeout::new(millis(delay), task))
        }
    }
}
