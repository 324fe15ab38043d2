//! Glaze Component Support
//!
//! Helpers shared by the glaze component layer:
//!
//! - **Responsive**: Tailwind-style breakpoints, device classes, and a
//!   viewport tracker that recomputes them on resize
//! - **Formatting**: compact count abbreviation for badges ("1.2k", "3.4M")
//!
//! # Example
//!
//! ```
//! use glaze_cn::responsive::{Breakpoint, ViewportTracker};
//!
//! let viewport = ViewportTracker::new(1024.0);
//! let snapshot = viewport.snapshot();
//! assert_eq!(snapshot.breakpoint, Breakpoint::Lg);
//! assert!(snapshot.is_desktop());
//! ```

pub mod format;
pub mod responsive;

pub use format::abbreviate_count;
pub use responsive::{
    device_class_for_width, Breakpoint, Breakpoints, DeviceClass, ViewportSnapshot,
    ViewportTracker, ViewportTrackerBuilder,
};
