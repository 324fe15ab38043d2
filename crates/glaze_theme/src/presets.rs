//! Built-in theme presets for the glaze kit.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Built-in theme preset catalog.
///
/// Presets carry identity only; visual tokens live with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// Frosted-glass default theme.
    Glass,
    /// Plain light preset.
    Light,
    /// Aurora gradient preset.
    Aurora,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Light => "light",
            Self::Aurora => "aurora",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Glass => "Glass",
            Self::Light => "Light",
            Self::Aurora => "Aurora",
        }
    }

    /// Full preset list, in the canonical toggle order.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] =
            [ThemePreset::Glass, ThemePreset::Light, ThemePreset::Aurora];
        &PRESETS
    }

    /// Look up a preset by its stable id.
    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
