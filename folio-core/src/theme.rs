//! Persisted light/dark theme preference

use std::sync::Mutex;

use crate::models::Theme;
use crate::storage::{lock_writes, Storage, StoreResult, THEME_KEY};

pub struct ThemePreference<S> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> ThemePreference<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Stored theme; dark when nothing usable is stored
    pub fn load(&self) -> StoreResult<Theme> {
        let theme = match self.storage.get_item(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
        };
        Ok(theme)
    }

    pub fn set(&self, theme: Theme) -> StoreResult<()> {
        self.storage.set_item(THEME_KEY, theme.as_str())
    }

    /// Flip between light and dark and return the new theme
    pub fn toggle(&self) -> StoreResult<Theme> {
        let _guard = lock_writes(&self.write_lock)?;
        let theme = self.load()?.toggled();
        self.set(theme)?;
        tracing::info!(%theme, "Theme switched");
        Ok(theme)
    }
}
