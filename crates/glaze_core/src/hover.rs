//! Hover state tracking
//!
//! Debounced hovered/not-hovered state driven by pointer enter/leave events.
//! Enter and leave transitions can each be delayed; a pointer event arriving
//! while the opposite transition is still pending cancels it, so rapid
//! enter/leave sequences never flicker. Focus events can optionally
//! participate, always without delay.
//!
//! # Example
//!
//! ```
//! use glaze_core::hover::HoverState;
//! use glaze_core::timer::SchedulerHandle;
//!
//! let scheduler = SchedulerHandle::new();
//! let hover = HoverState::builder(scheduler.clone())
//!     .enter_delay_ms(150)
//!     .build();
//!
//! hover.pointer_enter();
//! assert!(!hover.is_hovered());
//!
//! scheduler.advance(150);
//! assert!(hover.is_hovered());
//! ```

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use crate::events::{event_types, Event, EventDispatcher, EventHandler, InstalledHandlers};
use crate::timer::{SchedulerHandle, TimerId};

/// Callback invoked when the hovered value actually changes
pub type HoverCallback = Arc<dyn Fn(bool) + Send + Sync>;

struct HoverInner {
    is_hovered: bool,
    /// The single pending delayed transition, if any
    pending: Option<TimerId>,
}

struct HoverShared {
    state: Mutex<HoverInner>,
    scheduler: SchedulerHandle,
    enter_delay_ms: u64,
    leave_delay_ms: u64,
    include_focus: bool,
    on_change: Option<HoverCallback>,
}

impl HoverShared {
    /// Cancel any pending transition and set the value, firing `on_change`
    /// only when the value actually changes.
    fn apply(&self, value: bool) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            if let Some(timer) = state.pending.take() {
                self.scheduler.cancel(timer);
            }
            if state.is_hovered == value {
                false
            } else {
                state.is_hovered = value;
                true
            }
        };
        if changed {
            tracing::trace!(hovered = value, "hover state changed");
            if let Some(on_change) = &self.on_change {
                on_change(value);
            }
        }
    }

    /// Apply a pointer-driven transition, delayed when configured
    fn transition(shared: &Arc<Self>, value: bool, delay_ms: u64) {
        if delay_ms == 0 {
            shared.apply(value);
            return;
        }
        let mut state = shared.state.lock().unwrap();
        if let Some(timer) = state.pending.take() {
            shared.scheduler.cancel(timer);
        }
        if state.is_hovered == value {
            // Already at the target; cancelling the opposite transition was
            // all there was to do
            return;
        }
        let weak = Arc::downgrade(shared);
        let timer = shared.scheduler.schedule(delay_ms, move || {
            if let Some(shared) = weak.upgrade() {
                shared.apply(value);
            }
        });
        state.pending = Some(timer);
    }
}

/// Tracks whether an element is hovered
///
/// Constructed once per element instance via [`HoverState::builder`]; the
/// pending delayed transition is cancelled when the tracker is dropped.
pub struct HoverState {
    shared: Arc<HoverShared>,
}

impl HoverState {
    pub fn builder(scheduler: SchedulerHandle) -> HoverStateBuilder {
        HoverStateBuilder {
            scheduler,
            enter_delay_ms: 0,
            leave_delay_ms: 0,
            include_focus: false,
            on_change: None,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.shared.state.lock().unwrap().is_hovered
    }

    /// Pointer entered the element
    pub fn pointer_enter(&self) {
        HoverShared::transition(&self.shared, true, self.shared.enter_delay_ms);
    }

    /// Pointer left the element
    pub fn pointer_leave(&self) {
        HoverShared::transition(&self.shared, false, self.shared.leave_delay_ms);
    }

    /// Element received focus; hovers immediately when focus participates
    pub fn focus(&self) {
        if self.shared.include_focus {
            self.shared.apply(true);
        }
    }

    /// Element lost focus; unhovers immediately when focus participates
    pub fn blur(&self) {
        if self.shared.include_focus {
            self.shared.apply(false);
        }
    }

    /// Force the hovered value directly, cancelling any pending transition
    ///
    /// The change callback fires only when the value actually changes;
    /// setting the current value again is not observable.
    pub fn set_hovered(&self, value: bool) {
        self.shared.apply(value);
    }

    /// Event-handler bundle for attaching to an element
    ///
    /// `focus`/`blur` entries are present only when focus participates in
    /// hover. The closures hold weak references: once the tracker is
    /// dropped they no-op.
    pub fn handlers(&self) -> HoverHandlers {
        let enter = Arc::downgrade(&self.shared);
        let leave = Arc::downgrade(&self.shared);
        let focus_blur = self.shared.include_focus.then(|| {
            let focus = Arc::downgrade(&self.shared);
            let blur = Arc::downgrade(&self.shared);
            let focus: EventHandler = Box::new(move |_: &Event| {
                if let Some(shared) = focus.upgrade() {
                    shared.apply(true);
                }
            });
            let blur: EventHandler = Box::new(move |_: &Event| {
                if let Some(shared) = blur.upgrade() {
                    shared.apply(false);
                }
            });
            (focus, blur)
        });
        let (focus, blur) = match focus_blur {
            Some((focus, blur)) => (Some(focus), Some(blur)),
            None => (None, None),
        };
        HoverHandlers {
            pointer_enter: Box::new(move |_: &Event| {
                if let Some(shared) = enter.upgrade() {
                    HoverShared::transition(&shared, true, shared.enter_delay_ms);
                }
            }),
            pointer_leave: Box::new(move |_: &Event| {
                if let Some(shared) = leave.upgrade() {
                    HoverShared::transition(&shared, false, shared.leave_delay_ms);
                }
            }),
            focus,
            blur,
        }
    }

    /// Register this tracker's handlers on a dispatcher for `target`
    pub fn install(&self, dispatcher: &mut EventDispatcher, target: u64) -> InstalledHandlers {
        let handlers = self.handlers();
        let mut ids: SmallVec<[_; 4]> = SmallVec::new();
        let HoverHandlers {
            pointer_enter,
            pointer_leave,
            focus,
            blur,
        } = handlers;
        ids.push(dispatcher.register(target, event_types::POINTER_ENTER, move |e| {
            pointer_enter(e)
        }));
        ids.push(dispatcher.register(target, event_types::POINTER_LEAVE, move |e| {
            pointer_leave(e)
        }));
        if let Some(focus) = focus {
            ids.push(dispatcher.register(target, event_types::FOCUS, move |e| focus(e)));
        }
        if let Some(blur) = blur {
            ids.push(dispatcher.register(target, event_types::BLUR, move |e| blur(e)));
        }
        InstalledHandlers::new(ids)
    }
}

impl Drop for HoverState {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock().unwrap();
        if let Some(timer) = state.pending.take() {
            self.shared.scheduler.cancel(timer);
        }
    }
}

/// Event-handler bundle returned by [`HoverState::handlers`]
pub struct HoverHandlers {
    pub pointer_enter: EventHandler,
    pub pointer_leave: EventHandler,
    pub focus: Option<EventHandler>,
    pub blur: Option<EventHandler>,
}

/// Builder for [`HoverState`]
pub struct HoverStateBuilder {
    scheduler: SchedulerHandle,
    enter_delay_ms: u64,
    leave_delay_ms: u64,
    include_focus: bool,
    on_change: Option<HoverCallback>,
}

impl HoverStateBuilder {
    /// Delay before a pointer enter takes effect (default 0)
    pub fn enter_delay_ms(mut self, delay: u64) -> Self {
        self.enter_delay_ms = delay;
        self
    }

    /// Delay before a pointer leave takes effect (default 0)
    pub fn leave_delay_ms(mut self, delay: u64) -> Self {
        self.leave_delay_ms = delay;
        self
    }

    /// Let focus/blur drive the hovered value as well (default false)
    pub fn include_focus(mut self, include: bool) -> Self {
        self.include_focus = include;
        self
    }

    /// Callback invoked once per actual hovered-value change
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> HoverState {
        HoverState {
            shared: Arc::new(HoverShared {
                state: Mutex::new(HoverInner {
                    is_hovered: false,
                    pending: None,
                }),
                scheduler: self.scheduler,
                enter_delay_ms: self.enter_delay_ms,
                leave_delay_ms: self.leave_delay_ms,
                include_focus: self.include_focus,
                on_change: self.on_change,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_tracker(
        scheduler: SchedulerHandle,
        enter_delay: u64,
        leave_delay: u64,
    ) -> (HoverState, Arc<AtomicU32>) {
        let changes = Arc::new(AtomicU32::new(0));
        let changes_clone = changes.clone();
        let hover = HoverState::builder(scheduler)
            .enter_delay_ms(enter_delay)
            .leave_delay_ms(leave_delay)
            .on_change(move |_| {
                changes_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        (hover, changes)
    }

    #[test]
    fn test_no_delay_reflects_most_recent_event() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler, 0, 0);

        hover.pointer_enter();
        assert!(hover.is_hovered());
        hover.pointer_leave();
        assert!(!hover.is_hovered());
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_leave_before_enter_delay_cancels_pending_enter() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler.clone(), 100, 0);

        hover.pointer_enter();
        scheduler.advance(50);
        assert!(!hover.is_hovered());

        hover.pointer_leave();
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(1000);
        assert!(!hover.is_hovered());
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delayed_enter_applies_after_deadline() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler.clone(), 100, 0);

        hover.pointer_enter();
        scheduler.advance(99);
        assert!(!hover.is_hovered());

        scheduler.advance(1);
        assert!(hover.is_hovered());
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reenter_during_leave_delay_does_not_flicker() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler.clone(), 0, 100);

        hover.pointer_enter();
        assert!(hover.is_hovered());

        hover.pointer_leave();
        hover.pointer_enter();
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(1000);
        assert!(hover.is_hovered());
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_focus_applies_immediately_when_included() {
        let scheduler = SchedulerHandle::new();
        let changes = Arc::new(AtomicU32::new(0));
        let changes_clone = changes.clone();
        let hover = HoverState::builder(scheduler.clone())
            .enter_delay_ms(200)
            .leave_delay_ms(200)
            .include_focus(true)
            .on_change(move |_| {
                changes_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        hover.focus();
        assert!(hover.is_hovered());
        hover.blur();
        assert!(!hover.is_hovered());
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_focus_ignored_when_not_included() {
        let scheduler = SchedulerHandle::new();
        let hover = HoverState::builder(scheduler).build();

        hover.focus();
        assert!(!hover.is_hovered());
    }

    #[test]
    fn test_redundant_events_fire_callback_once() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler, 0, 0);

        hover.pointer_enter();
        hover.pointer_enter();
        hover.pointer_enter();
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn redundant_manual_set_does_not_fire_callback() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler, 0, 0);

        hover.set_hovered(false);
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        hover.set_hovered(true);
        assert_eq!(changes.load(Ordering::SeqCst), 1);

        hover.set_hovered(true);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_manual_set_cancels_pending_transition() {
        let scheduler = SchedulerHandle::new();
        let (hover, _) = counting_tracker(scheduler.clone(), 100, 0);

        hover.pointer_enter();
        assert_eq!(scheduler.pending(), 1);

        hover.set_hovered(false);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(1000);
        assert!(!hover.is_hovered());
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler.clone(), 100, 0);

        hover.pointer_enter();
        assert_eq!(scheduler.pending(), 1);

        drop(hover);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(1000);
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handlers_bundle_includes_focus_only_when_configured() {
        let scheduler = SchedulerHandle::new();

        let plain = HoverState::builder(scheduler.clone()).build();
        let handlers = plain.handlers();
        assert!(handlers.focus.is_none());
        assert!(handlers.blur.is_none());

        let focusable = HoverState::builder(scheduler).include_focus(true).build();
        let handlers = focusable.handlers();
        assert!(handlers.focus.is_some());
        assert!(handlers.blur.is_some());
    }

    #[test]
    fn test_handlers_noop_after_tracker_dropped() {
        let scheduler = SchedulerHandle::new();
        let (hover, changes) = counting_tracker(scheduler, 0, 0);
        let handlers = hover.handlers();
        drop(hover);

        let event = Event::new(event_types::POINTER_ENTER, 1, crate::events::EventData::None);
        (handlers.pointer_enter)(&event);
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }
}
