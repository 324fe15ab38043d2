//! Theme configuration
//!
//! The user-facing knobs: which preset to start with and the rotation the
//! toggle walks through. Parsed from TOML and validated at load, so a
//! config naming duplicates, an empty order, or an initial theme outside
//! the order is rejected up front.

use serde::{Deserialize, Serialize};

use crate::cycle::ThemeCycle;
use crate::error::ThemeError;
use crate::presets::ThemePreset;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preset active at startup.
    pub initial: ThemePreset,
    /// Rotation order for the theme toggle.
    pub order: Vec<ThemePreset>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            initial: ThemePreset::Glass,
            order: ThemePreset::all().to_vec(),
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ThemeError> {
        let config: ThemeConfig = toml::from_str(input)?;
        config.validate()?;
        tracing::debug!(initial = %config.initial, "loaded theme config");
        Ok(config)
    }

    /// Build the rotation this config describes.
    pub fn cycle(&self) -> Result<ThemeCycle, ThemeError> {
        ThemeCycle::new(self.order.clone())
    }

    fn validate(&self) -> Result<(), ThemeError> {
        let cycle = self.cycle()?;
        if !cycle.order().contains(&self.initial) {
            return Err(ThemeError::UnknownTheme(self.initial));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_defaults() {
        let config = ThemeConfig::from_toml_str("").unwrap();
        assert_eq!(config, ThemeConfig::default());
    }

    #[test]
    fn test_parses_ids_and_partial_order() {
        let config = ThemeConfig::from_toml_str(
            r#"
            initial = "aurora"
            order = ["aurora", "glass"]
            "#,
        )
        .unwrap();
        assert_eq!(config.initial, ThemePreset::Aurora);
        assert_eq!(
            config.order,
            vec![ThemePreset::Aurora, ThemePreset::Glass]
        );
    }

    #[test]
    fn test_initial_outside_order_is_rejected() {
        let result = ThemeConfig::from_toml_str(
            r#"
            initial = "light"
            order = ["glass", "aurora"]
            "#,
        );
        assert!(matches!(
            result,
            Err(ThemeError::UnknownTheme(ThemePreset::Light))
        ));
    }

    #[test]
    fn test_unknown_id_is_a_config_error() {
        let result = ThemeConfig::from_toml_str(r#"initial = "neon""#);
        assert!(matches!(result, Err(ThemeError::Config(_))));
    }

    #[test]
    fn test_duplicate_order_is_rejected_at_load() {
        let result = ThemeConfig::from_toml_str(r#"order = ["glass", "glass"]"#);
        assert!(matches!(
            result,
            Err(ThemeError::DuplicateTheme(ThemePreset::Glass))
        ));
    }
}
