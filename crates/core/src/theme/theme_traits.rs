//! Repository traits for the theme preference.

use super::Theme;
use crate::errors::Result;

/// Persistence of the user's theme choice.
pub trait ThemePreferenceRepository: Send + Sync {
    /// The stored theme, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Theme>>;

    fn save(&self, theme: Theme) -> Result<()>;
}
