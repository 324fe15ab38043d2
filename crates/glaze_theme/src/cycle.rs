//! Theme cycling
//!
//! The fixed rotation a theme-toggle control walks through. The cycle is a
//! pure lookup over an ordered preset list; the toggle itself owns the
//! current theme.
//!
//! A `current` value absent from the order is a configuration error and
//! fails loudly rather than silently falling back to the first preset.

use crate::error::ThemeError;
use crate::presets::ThemePreset;

/// An ordered, duplicate-free rotation of theme presets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeCycle {
    order: Vec<ThemePreset>,
}

impl ThemeCycle {
    /// Create a cycle from an explicit order.
    ///
    /// Rejects an empty order and duplicate entries, so `next`/`prev` are
    /// well-defined for every member.
    pub fn new(order: Vec<ThemePreset>) -> Result<Self, ThemeError> {
        if order.is_empty() {
            return Err(ThemeError::EmptyCycle);
        }
        for (i, preset) in order.iter().enumerate() {
            if order[..i].contains(preset) {
                return Err(ThemeError::DuplicateTheme(*preset));
            }
        }
        Ok(Self { order })
    }

    /// The rotation order.
    pub fn order(&self) -> &[ThemePreset] {
        &self.order
    }

    /// The preset after `current` in the rotation, wrapping at the end.
    pub fn next(&self, current: ThemePreset) -> Result<ThemePreset, ThemeError> {
        let index = self.position(current)?;
        Ok(self.order[(index + 1) % self.order.len()])
    }

    /// The preset before `current` in the rotation, wrapping at the start.
    pub fn prev(&self, current: ThemePreset) -> Result<ThemePreset, ThemeError> {
        let index = self.position(current)?;
        Ok(self.order[(index + self.order.len() - 1) % self.order.len()])
    }

    fn position(&self, current: ThemePreset) -> Result<usize, ThemeError> {
        self.order
            .iter()
            .position(|p| *p == current)
            .ok_or(ThemeError::UnknownTheme(current))
    }
}

impl Default for ThemeCycle {
    /// The canonical glass → light → aurora rotation.
    fn default() -> Self {
        Self {
            order: ThemePreset::all().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_at_the_end() {
        let cycle = ThemeCycle::default();
        assert_eq!(cycle.next(ThemePreset::Aurora).unwrap(), ThemePreset::Glass);
    }

    #[test]
    fn test_prev_is_the_inverse_of_next() {
        let cycle = ThemeCycle::default();
        for preset in cycle.order() {
            let next = cycle.next(*preset).unwrap();
            assert_eq!(cycle.prev(next).unwrap(), *preset);
        }
    }

    #[test]
    fn test_unknown_current_fails_loudly() {
        let cycle = ThemeCycle::new(vec![ThemePreset::Glass, ThemePreset::Light]).unwrap();
        assert!(matches!(
            cycle.next(ThemePreset::Aurora),
            Err(ThemeError::UnknownTheme(ThemePreset::Aurora))
        ));
    }

    #[test]
    fn test_empty_order_is_rejected() {
        assert!(matches!(
            ThemeCycle::new(Vec::new()),
            Err(ThemeError::EmptyCycle)
        ));
    }

    #[test]
    fn test_duplicate_entries_are_rejected() {
        assert!(matches!(
            ThemeCycle::new(vec![
                ThemePreset::Glass,
                ThemePreset::Light,
                ThemePreset::Glass
            ]),
            Err(ThemeError::DuplicateTheme(ThemePreset::Glass))
        ));
    }

    #[test]
    fn test_single_theme_cycles_to_itself() {
        let cycle = ThemeCycle::new(vec![ThemePreset::Glass]).unwrap();
        assert_eq!(cycle.next(ThemePreset::Glass).unwrap(), ThemePreset::Glass);
        assert_eq!(cycle.prev(ThemePreset::Glass).unwrap(), ThemePreset::Glass);
    }
}
