//! Glaze Core Runtime
//!
//! This crate provides the foundational interaction primitives for the
//! glaze UI kit:
//!
//! - **Event Dispatch**: platform-agnostic event vocabulary and routing
//! - **Timer Scheduling**: cancellable delayed callbacks on a virtual clock
//! - **Hover Tracking**: debounced hovered state with enter/leave delays
//! - **Focus Tracking**: focused and keyboard-only focus-visible state
//!
//! Each tracker is an isolated, per-element state object: constructed on
//! mount, exposing a state snapshot plus an event-handler bundle, and
//! cancelling its pending timers and listener registrations on teardown.
//!
//! # Example
//!
//! ```
//! use glaze_core::hover::HoverState;
//! use glaze_core::timer::SchedulerHandle;
//!
//! let scheduler = SchedulerHandle::new();
//! let hover = HoverState::builder(scheduler.clone())
//!     .leave_delay_ms(100)
//!     .build();
//!
//! hover.pointer_enter();
//! hover.pointer_leave();
//! hover.pointer_enter(); // cancels the pending leave
//! scheduler.advance(1_000);
//! assert!(hover.is_hovered());
//! ```

pub mod events;
pub mod focus;
pub mod hover;
pub mod timer;

pub use events::{
    Event, EventData, EventDispatcher, EventHandler, EventType, HandlerId, InstalledHandlers,
    KeyCode, Modifiers,
};
pub use focus::{FocusHandlers, FocusState, FocusStateBuilder};
pub use hover::{HoverHandlers, HoverState, HoverStateBuilder};
pub use timer::{SchedulerHandle, TimerId, TimerScheduler};
