//! Glaze Theme System
//!
//! Theme identity for the glaze UI kit: the built-in preset catalog, the
//! rotation a theme-toggle control walks through, and the TOML config
//! surface that selects both.
//!
//! Visual tokens (colors, blur radii, shadows) live with the renderer;
//! presets carry identity only.
//!
//! # Quick Start
//!
//! ```
//! use glaze_theme::{ThemeCycle, ThemePreset};
//!
//! let cycle = ThemeCycle::default();
//! let next = cycle.next(ThemePreset::Glass)?;
//! assert_eq!(next, ThemePreset::Light);
//! # Ok::<(), glaze_theme::ThemeError>(())
//! ```
//!
//! Cycling past an unknown preset is a configuration error and fails
//! loudly; nothing silently falls back to a default theme.

pub mod config;
pub mod cycle;
pub mod error;
pub mod presets;

pub use config::ThemeConfig;
pub use cycle::ThemeCycle;
pub use error::ThemeError;
pub use presets::ThemePreset;
