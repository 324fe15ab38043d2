//! Event dispatch
//!
//! Platform-agnostic event vocabulary for the interaction trackers, plus a
//! dispatcher that routes events to per-element handlers. Handlers are
//! identified by a [`HandlerId`] so trackers can detach their listeners on
//! teardown.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Event kinds consumed by the interaction-state trackers
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 1;
    pub const POINTER_LEAVE: EventType = 2;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    pub const KEY_DOWN: EventType = 20;
    pub const RESIZE: EventType = 40;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Element ID
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

impl Event {
    /// Create an event with a zero timestamp (hosts that care stamp it themselves)
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event-specific data
///
/// The trackers treat events as opaque triggers; only the resize payload is
/// actually inspected (for the new viewport width).
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Key {
        /// Virtual key code (platform-agnostic)
        key: KeyCode,
        /// Keyboard modifier flags
        modifiers: Modifiers,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

/// Virtual key codes (platform-agnostic)
///
/// Only the keys interaction tracking cares about get named constants;
/// everything else arrives as its raw code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000;

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

new_key_type! {
    /// Identifier for a registered event handler
    pub struct HandlerId;
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

struct HandlerEntry {
    key: (u64, EventType),
    handler: EventHandler,
}

/// Dispatches events to registered handlers
///
/// Registration returns a [`HandlerId`]; a handler stays active until it is
/// unregistered, so trackers must remove their registrations on teardown.
pub struct EventDispatcher {
    handlers: SlotMap<HandlerId, HandlerEntry>,
    index: FxHashMap<(u64, EventType), SmallVec<[HandlerId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register an event handler for an element and event type
    pub fn register<F>(&mut self, target: u64, event_type: EventType, handler: F) -> HandlerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let key = (target, event_type);
        let id = self.handlers.insert(HandlerEntry {
            key,
            handler: Box::new(handler),
        });
        self.index.entry(key).or_default().push(id);
        id
    }

    /// Remove a previously registered handler
    ///
    /// Returns false if the handler was already removed.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let Some(entry) = self.handlers.remove(id) else {
            return false;
        };
        if let Some(ids) = self.index.get_mut(&entry.key) {
            ids.retain(|h| *h != id);
            if ids.is_empty() {
                self.index.remove(&entry.key);
            }
        }
        true
    }

    /// Dispatch an event to all handlers registered for its target and type
    pub fn dispatch(&self, event: &mut Event) {
        let Some(ids) = self.index.get(&(event.target, event.event_type)) else {
            return;
        };
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(entry) = self.handlers.get(*id) {
                (entry.handler)(event);
            }
        }
    }

    /// Number of currently registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler registrations owned by a tracker installed on a dispatcher
///
/// Consume with [`InstalledHandlers::uninstall`] to detach the tracker from
/// the dispatcher.
#[must_use = "dropping InstalledHandlers leaves the registrations in the dispatcher"]
pub struct InstalledHandlers {
    ids: SmallVec<[HandlerId; 4]>,
}

impl InstalledHandlers {
    /// Bundle registrations for later removal
    pub fn new(ids: impl IntoIterator<Item = HandlerId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Remove every registration this tracker made
    pub fn uninstall(self, dispatcher: &mut EventDispatcher) {
        for id in self.ids {
            dispatcher.unregister(id);
        }
    }

    /// Number of registrations held
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
