//! Theme module - light/dark preference with explicit change notification.

mod theme_model;
mod theme_repository;
mod theme_store;
mod theme_traits;

// Re-export the public interface
pub use theme_model::Theme;
pub use theme_repository::{FileThemePreference, InMemoryThemePreference};
pub use theme_store::{ThemeStore, ThemeSubscription};
pub use theme_traits::ThemePreferenceRepository;
