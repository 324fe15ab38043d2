//! Focus state tracking
//!
//! Focused and focus-visible state driven by focus/blur/keydown events.
//! Focus-visible distinguishes keyboard-driven focus (show the outline)
//! from pointer-driven focus: it is set only when a keydown was observed
//! since the last blur, tracked by an internal latch that nothing but blur
//! resets.

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use crate::events::{event_types, Event, EventDispatcher, EventHandler, InstalledHandlers};

/// Callback invoked when the focused value actually changes
pub type FocusCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Passthrough for keydown events observed by the tracker
pub type KeyDownCallback = Arc<dyn Fn(&Event) + Send + Sync>;

struct FocusInner {
    is_focused: bool,
    is_focus_visible: bool,
    /// True when the most recent input since the last blur was a key press
    keyboard_latch: bool,
}

struct FocusShared {
    state: Mutex<FocusInner>,
    focus_visible: bool,
    on_key_down: Option<KeyDownCallback>,
    on_change: Option<FocusCallback>,
}

impl FocusShared {
    fn focus(&self) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            let was_focused = state.is_focused;
            state.is_focused = true;
            state.is_focus_visible = self.focus_visible && state.keyboard_latch;
            !was_focused
        };
        if changed {
            tracing::trace!("focus gained");
            if let Some(on_change) = &self.on_change {
                on_change(true);
            }
        }
    }

    fn blur(&self) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            let was_focused = state.is_focused;
            state.is_focused = false;
            state.is_focus_visible = false;
            state.keyboard_latch = false;
            was_focused
        };
        if changed {
            tracing::trace!("focus lost");
            if let Some(on_change) = &self.on_change {
                on_change(false);
            }
        }
    }

    fn key_down(&self, event: &Event) {
        self.state.lock().unwrap().keyboard_latch = true;
        if let Some(on_key_down) = &self.on_key_down {
            on_key_down(event);
        }
    }
}

/// Tracks whether an element is focused and whether that focus is
/// keyboard-driven
///
/// Constructed once per element instance via [`FocusState::builder`].
pub struct FocusState {
    shared: Arc<FocusShared>,
}

impl FocusState {
    pub fn builder() -> FocusStateBuilder {
        FocusStateBuilder {
            focus_visible: false,
            on_key_down: None,
            on_change: None,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.shared.state.lock().unwrap().is_focused
    }

    /// True only when focus-visible tracking is enabled and the current
    /// focus session began from the keyboard
    pub fn is_focus_visible(&self) -> bool {
        self.shared.state.lock().unwrap().is_focus_visible
    }

    /// Element received focus
    pub fn focus(&self) {
        self.shared.focus();
    }

    /// Element lost focus; clears both flags and the keyboard latch
    pub fn blur(&self) {
        self.shared.blur();
    }

    /// A key was pressed while the element could receive it
    ///
    /// Marks the keyboard latch and forwards the event to the configured
    /// passthrough, if any.
    pub fn key_down(&self, event: &Event) {
        self.shared.key_down(event);
    }

    /// Force the focused value directly
    ///
    /// `true` behaves like a focus event (focus-visible gating included),
    /// `false` like a blur. The change callback fires only when the value
    /// actually changes; setting the current value again is not observable.
    pub fn set_focused(&self, value: bool) {
        if value {
            self.shared.focus();
        } else {
            self.shared.blur();
        }
    }

    /// Event-handler bundle for attaching to an element
    ///
    /// The `key_down` entry is present only when an `on_key_down`
    /// passthrough was configured; consumers rely on absence vs. no-op for
    /// conditional wiring. The closures hold weak references: once the
    /// tracker is dropped they no-op.
    pub fn handlers(&self) -> FocusHandlers {
        let focus = Arc::downgrade(&self.shared);
        let blur = Arc::downgrade(&self.shared);
        let key_down = self.shared.on_key_down.is_some().then(|| {
            let weak = Arc::downgrade(&self.shared);
            let handler: EventHandler = Box::new(move |event: &Event| {
                if let Some(shared) = weak.upgrade() {
                    shared.key_down(event);
                }
            });
            handler
        });
        FocusHandlers {
            focus: Box::new(move |_: &Event| {
                if let Some(shared) = focus.upgrade() {
                    shared.focus();
                }
            }),
            blur: Box::new(move |_: &Event| {
                if let Some(shared) = blur.upgrade() {
                    shared.blur();
                }
            }),
            key_down,
        }
    }

    /// Register this tracker's handlers on a dispatcher for `target`
    pub fn install(&self, dispatcher: &mut EventDispatcher, target: u64) -> InstalledHandlers {
        let FocusHandlers {
            focus,
            blur,
            key_down,
        } = self.handlers();
        let mut ids: SmallVec<[_; 4]> = SmallVec::new();
        ids.push(dispatcher.register(target, event_types::FOCUS, move |e| focus(e)));
        ids.push(dispatcher.register(target, event_types::BLUR, move |e| blur(e)));
        if let Some(key_down) = key_down {
            ids.push(dispatcher.register(target, event_types::KEY_DOWN, move |e| key_down(e)));
        }
        InstalledHandlers::new(ids)
    }
}

/// Event-handler bundle returned by [`FocusState::handlers`]
pub struct FocusHandlers {
    pub focus: EventHandler,
    pub blur: EventHandler,
    /// Present only when an `on_key_down` passthrough was configured
    pub key_down: Option<EventHandler>,
}

/// Builder for [`FocusState`]
pub struct FocusStateBuilder {
    focus_visible: bool,
    on_key_down: Option<KeyDownCallback>,
    on_change: Option<FocusCallback>,
}

impl FocusStateBuilder {
    /// Enable keyboard-only focus-visible tracking (default false)
    pub fn focus_visible(mut self, enabled: bool) -> Self {
        self.focus_visible = enabled;
        self
    }

    /// Passthrough invoked for every keydown the tracker observes
    pub fn on_key_down<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.on_key_down = Some(Arc::new(callback));
        self
    }

    /// Callback invoked once per actual focused-value change
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> FocusState {
        FocusState {
            shared: Arc::new(FocusShared {
                state: Mutex::new(FocusInner {
                    is_focused: false,
                    is_focus_visible: false,
                    keyboard_latch: false,
                }),
                focus_visible: self.focus_visible,
                on_key_down: self.on_key_down,
                on_change: self.on_change,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventData, KeyCode, Modifiers};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn key_event() -> Event {
        Event::new(
            event_types::KEY_DOWN,
            1,
            EventData::Key {
                key: KeyCode::TAB,
                modifiers: Modifiers::NONE,
            },
        )
    }

    #[test]
    fn test_focus_and_blur_toggle_focused() {
        let focus = FocusState::builder().build();

        focus.focus();
        assert!(focus.is_focused());

        focus.blur();
        assert!(!focus.is_focused());
    }

    #[test]
    fn test_keyboard_focus_sets_focus_visible() {
        let focus = FocusState::builder().focus_visible(true).build();

        focus.key_down(&key_event());
        focus.focus();
        assert!(focus.is_focused());
        assert!(focus.is_focus_visible());
    }

    #[test]
    fn test_pointer_focus_is_not_focus_visible() {
        let focus = FocusState::builder().focus_visible(true).build();

        // Focus without any preceding keydown, e.g. via pointer
        focus.focus();
        assert!(focus.is_focused());
        assert!(!focus.is_focus_visible());
    }

    #[test]
    fn test_blur_resets_the_keyboard_latch() {
        let focus = FocusState::builder().focus_visible(true).build();

        focus.key_down(&key_event());
        focus.focus();
        assert!(focus.is_focus_visible());

        focus.blur();
        assert!(!focus.is_focus_visible());

        // New session without a keydown: pointer focus again
        focus.focus();
        assert!(!focus.is_focus_visible());
    }

    #[test]
    fn test_focus_visible_disabled_by_default() {
        let focus = FocusState::builder().build();

        focus.key_down(&key_event());
        focus.focus();
        assert!(focus.is_focused());
        assert!(!focus.is_focus_visible());
    }

    #[test]
    fn test_key_down_forwards_to_passthrough() {
        let seen = Arc::new(AtomicU32::new(0));
        let seen_clone = seen.clone();
        let focus = FocusState::builder()
            .on_key_down(move |_| {
                seen_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        focus.key_down(&key_event());
        focus.key_down(&key_event());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_bundle_key_down_present_only_with_passthrough() {
        let plain = FocusState::builder().build();
        assert!(plain.handlers().key_down.is_none());

        let wired = FocusState::builder().on_key_down(|_| {}).build();
        assert!(wired.handlers().key_down.is_some());
    }

    #[test]
    fn redundant_manual_set_does_not_fire_callback() {
        let changes = Arc::new(AtomicU32::new(0));
        let changes_clone = changes.clone();
        let focus = FocusState::builder()
            .on_change(move |_| {
                changes_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        focus.set_focused(false);
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        focus.set_focused(true);
        focus.set_focused(true);
        assert_eq!(changes.load(Ordering::SeqCst), 1);

        focus.set_focused(false);
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_change_callback_fires_once_per_transition() {
        let changes = Arc::new(AtomicU32::new(0));
        let changes_clone = changes.clone();
        let focus = FocusState::builder()
            .on_change(move |_| {
                changes_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        focus.focus();
        focus.focus();
        focus.blur();
        focus.blur();
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }
}
