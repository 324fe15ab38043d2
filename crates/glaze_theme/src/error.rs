use thiserror::Error;

use crate::presets::ThemePreset;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme `{0}` is not in the cycle order")]
    UnknownTheme(ThemePreset),

    #[error("theme cycle order is empty")]
    EmptyCycle,

    #[error("theme `{0}` appears more than once in the cycle order")]
    DuplicateTheme(ThemePreset),

    #[error("invalid theme config: {0}")]
    Config(#[from] toml::de::Error),
}
