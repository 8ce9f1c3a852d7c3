//! Theme preference repositories.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Theme, ThemePreferenceRepository};
use crate::errors::{Error, Result};

/// Keeps the preference for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemoryThemePreference {
    theme: Mutex<Option<Theme>>,
}

impl InMemoryThemePreference {
    pub fn new(initial: Option<Theme>) -> Self {
        Self {
            theme: Mutex::new(initial),
        }
    }
}

impl ThemePreferenceRepository for InMemoryThemePreference {
    fn load(&self) -> Result<Option<Theme>> {
        Ok(*self.theme.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = Some(theme);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

/// Stores the preference as `{ "theme": "dark" }` in a JSON file.
#[derive(Debug, Clone)]
pub struct FileThemePreference {
    path: PathBuf,
}

impl FileThemePreference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemePreferenceRepository for FileThemePreference {
    fn load(&self) -> Result<Option<Theme>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No theme preference at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::Preference(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let stored: StoredPreference = serde_json::from_str(&raw).map_err(|e| {
            Error::Preference(format!("Invalid preference file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(stored.theme))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Preference(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let body = serde_json::to_string_pretty(&StoredPreference { theme })
            .map_err(|e| Error::Preference(format!("Failed to encode preference: {}", e)))?;
        std::fs::write(&self.path, body).map_err(|e| {
            Error::Preference(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}
