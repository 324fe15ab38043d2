//! Timer scheduling
//!
//! Cancellable delayed callbacks on a virtual millisecond clock. The host
//! event loop drives time explicitly via [`SchedulerHandle::advance`], which
//! keeps delayed interaction-state transitions deterministic under test.
//!
//! A fired or cancelled timer is removed from the scheduler; a stale
//! callback can never fire after cancellation.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Identifier for a scheduled timer
    pub struct TimerId;
}

type TimerCallback = Box<dyn FnMut() + Send>;

struct ScheduledTimer {
    deadline_ms: u64,
    /// Tie-breaker: timers due at the same deadline fire in scheduling order
    seq: u64,
    callback: TimerCallback,
}

/// Scheduler for delayed one-shot callbacks
///
/// Usually accessed through a [`SchedulerHandle`]; the raw scheduler is
/// exposed for hosts that own it directly.
pub struct TimerScheduler {
    timers: SlotMap<TimerId, ScheduledTimer>,
    now_ms: u64,
    next_seq: u64,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a one-shot callback to fire after `delay_ms`
    pub fn schedule<F>(&mut self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnMut() + Send + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(ScheduledTimer {
            deadline_ms: self.now_ms + delay_ms,
            seq,
            callback: Box::new(callback),
        })
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Number of timers still pending
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    fn bump_clock(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;
    }

    /// Remove and return the earliest due callback, if any
    fn pop_due(&mut self) -> Option<TimerCallback> {
        let due = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline_ms <= self.now_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.seq))
            .map(|(id, _)| id)?;
        self.timers.remove(due).map(|t| t.callback)
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a [`TimerScheduler`]
///
/// Cheap to clone; trackers hold one to schedule and cancel their pending
/// transitions. [`advance`](SchedulerHandle::advance) fires due callbacks
/// one at a time with the scheduler lock released, so a callback may
/// re-enter the handle to schedule or cancel further timers.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Arc<Mutex<TimerScheduler>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerScheduler::new())),
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.inner.lock().unwrap().now_ms()
    }

    /// Schedule a one-shot callback to fire after `delay_ms`
    pub fn schedule<F>(&self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnMut() + Send + 'static,
    {
        self.inner.lock().unwrap().schedule(delay_ms, callback)
    }

    /// Cancel a pending timer
    pub fn cancel(&self, id: TimerId) -> bool {
        let cancelled = self.inner.lock().unwrap().cancel(id);
        if cancelled {
            tracing::trace!(?id, "timer cancelled");
        }
        cancelled
    }

    /// Number of timers still pending
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().pending()
    }

    /// Advance the virtual clock and fire every timer that comes due
    ///
    /// Callbacks run in deadline order (scheduling order on ties). A callback
    /// that schedules a new timer with zero delay will see it fire within the
    /// same `advance` call.
    pub fn advance(&self, delta_ms: u64) {
        self.inner.lock().unwrap().bump_clock(delta_ms);
        loop {
            let callback = self.inner.lock().unwrap().pop_due();
            match callback {
                Some(mut callback) => callback(),
                None => break,
            }
        }
    }
}

impl Default for SchedulerHandle {
    fn default() -> Self {
        Self::new()
    }
}
