//! Responsive helpers for Tailwind-style breakpoints.
//!
//! A viewport width maps to exactly one named breakpoint and one device
//! class for any width >= 0; boundary widths belong to the higher bucket.
//! The device-class split uses different boundaries than the breakpoint
//! names: `sm` still counts as mobile and `md` as tablet.

use std::sync::{Arc, Mutex};

use glaze_core::events::{event_types, Event, EventData, EventDispatcher, InstalledHandlers};

/// Tailwind-compatible breakpoint widths in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoints {
    /// Small breakpoint (`sm`) - 640px
    pub sm: f32,
    /// Medium breakpoint (`md`) - 768px
    pub md: f32,
    /// Large breakpoint (`lg`) - 1024px
    pub lg: f32,
    /// Extra large breakpoint (`xl`) - 1280px
    pub xl: f32,
    /// 2x large breakpoint (`2xl`) - 1536px
    pub xxl: f32,
}

impl Breakpoints {
    /// Default Tailwind breakpoints (`sm`/`md`/`lg`/`xl`/`2xl`).
    pub const DEFAULT: Self = Self {
        sm: 640.0,
        md: 768.0,
        lg: 1024.0,
        xl: 1280.0,
        xxl: 1536.0,
    };

    /// Bucket a width into its named breakpoint.
    pub fn breakpoint_for_width(&self, width: f32) -> Breakpoint {
        match width {
            w if w < self.sm => Breakpoint::Xs,
            w if w < self.md => Breakpoint::Sm,
            w if w < self.lg => Breakpoint::Md,
            w if w < self.xl => Breakpoint::Lg,
            w if w < self.xxl => Breakpoint::Xl,
            _ => Breakpoint::Xxl,
        }
    }

    /// Classify a width into mobile/tablet/desktop.
    pub fn device_class_for_width(&self, width: f32) -> DeviceClass {
        match width {
            w if w < self.md => DeviceClass::Mobile,
            w if w < self.lg => DeviceClass::Tablet,
            _ => DeviceClass::Desktop,
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Named breakpoint buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// Width < `sm` (640px)
    Xs,
    /// `sm` <= width < `md` (768px)
    Sm,
    /// `md` <= width < `lg` (1024px)
    Md,
    /// `lg` <= width < `xl` (1280px)
    Lg,
    /// `xl` <= width < `2xl` (1536px)
    Xl,
    /// Width >= `2xl` (1536px)
    Xxl,
}

impl Breakpoint {
    /// Tailwind-style label (`"xs"`..`"2xl"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Device-class abstraction derived from Tailwind breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    /// Width < `md` (768px)
    Mobile,
    /// `md` <= width < `lg` (1024px)
    Tablet,
    /// Width >= `lg` (1024px)
    Desktop,
}

/// Classify device width into mobile/tablet/desktop using Tailwind defaults.
pub fn device_class_for_width(width: f32) -> DeviceClass {
    Breakpoints::DEFAULT.device_class_for_width(width)
}

/// Everything derived from the current viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSnapshot {
    pub width: f32,
    pub breakpoint: Breakpoint,
    pub device_class: DeviceClass,
}

impl ViewportSnapshot {
    fn for_width(width: f32, table: &Breakpoints) -> Self {
        Self {
            width,
            breakpoint: table.breakpoint_for_width(width),
            device_class: table.device_class_for_width(width),
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.device_class == DeviceClass::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.device_class == DeviceClass::Tablet
    }

    pub fn is_desktop(&self) -> bool {
        self.device_class == DeviceClass::Desktop
    }
}

/// Callback invoked when the breakpoint or device class actually changes
pub type ViewportCallback = Arc<dyn Fn(ViewportSnapshot) + Send + Sync>;

struct ViewportShared {
    state: Mutex<ViewportSnapshot>,
    table: Breakpoints,
    on_change: Option<ViewportCallback>,
}

impl ViewportShared {
    fn resize(&self, width: f32) {
        let next = ViewportSnapshot::for_width(width, &self.table);
        let changed = {
            let mut state = self.state.lock().unwrap();
            let changed = state.breakpoint != next.breakpoint
                || state.device_class != next.device_class;
            *state = next;
            changed
        };
        if changed {
            tracing::debug!(breakpoint = %next.breakpoint, width, "breakpoint changed");
            if let Some(on_change) = &self.on_change {
                on_change(next);
            }
        }
    }
}

/// Tracks the viewport width and its derived breakpoint/device class
///
/// Recomputes synchronously on every resize notification. Attach to a
/// dispatcher with [`install`](ViewportTracker::install); the returned
/// registrations must be uninstalled on teardown, and a resize racing past
/// teardown hits a dead weak reference and no-ops.
pub struct ViewportTracker {
    shared: Arc<ViewportShared>,
}

impl ViewportTracker {
    pub fn builder(initial_width: f32) -> ViewportTrackerBuilder {
        ViewportTrackerBuilder {
            initial_width,
            table: Breakpoints::DEFAULT,
            on_change: None,
        }
    }

    /// Construct with default breakpoints and no change callback.
    pub fn new(initial_width: f32) -> Self {
        Self::builder(initial_width).build()
    }

    /// Current width and derived fields.
    pub fn snapshot(&self) -> ViewportSnapshot {
        *self.shared.state.lock().unwrap()
    }

    /// The viewport width changed.
    pub fn handle_resize(&self, width: f32) {
        self.shared.resize(width);
    }

    /// Register a resize listener on a dispatcher for `target`
    ///
    /// `target` is the element id the host delivers window resize events
    /// to (commonly a root/window id).
    pub fn install(&self, dispatcher: &mut EventDispatcher, target: u64) -> InstalledHandlers {
        let weak = Arc::downgrade(&self.shared);
        let id = dispatcher.register(target, event_types::RESIZE, move |event: &Event| {
            if let EventData::Resize { width, .. } = event.data {
                if let Some(shared) = weak.upgrade() {
                    shared.resize(width);
                }
            }
        });
        InstalledHandlers::new([id])
    }
}

/// Builder for [`ViewportTracker`]
pub struct ViewportTrackerBuilder {
    initial_width: f32,
    table: Breakpoints,
    on_change: Option<ViewportCallback>,
}

impl ViewportTrackerBuilder {
    /// Override the breakpoint threshold table.
    pub fn breakpoints(mut self, table: Breakpoints) -> Self {
        self.table = table;
        self
    }

    /// Callback invoked when the breakpoint or device class changes.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(ViewportSnapshot) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> ViewportTracker {
        ViewportTracker {
            shared: Arc::new(ViewportShared {
                state: Mutex::new(ViewportSnapshot::for_width(self.initial_width, &self.table)),
                table: self.table,
                on_change: self.on_change,
            }),
        }
    }
}
