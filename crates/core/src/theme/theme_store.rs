//! Process-wide theme state.

use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use log::{debug, info, warn};

use super::{Theme, ThemePreferenceRepository};

type Listener = Arc<dyn Fn(Theme) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct ThemeStoreInner {
    current: RwLock<Theme>,
    listeners: Mutex<Listeners>,
    repository: Arc<dyn ThemePreferenceRepository>,
}

impl ThemeStoreInner {
    fn remove_listener(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .retain(|(entry_id, _)| *entry_id != id);
    }
}

/// Holds the active theme and tells subscribers when it changes.
///
/// The theme only changes through [`set`](Self::set) or
/// [`toggle`](Self::toggle). Every change is persisted and then delivered to
/// each listener registered with [`on_change`](Self::on_change). Clones share
/// the same state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Arc<ThemeStoreInner>,
}

impl ThemeStore {
    /// Build the store from the persisted preference.
    ///
    /// A missing or unreadable preference starts the store in light mode.
    pub fn load(repository: Arc<dyn ThemePreferenceRepository>) -> Self {
        let initial = match repository.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to load theme preference, using default: {}", e);
                Theme::default()
            }
        };
        debug!("Theme store initialised with '{}'", initial);

        Self {
            inner: Arc::new(ThemeStoreInner {
                current: RwLock::new(initial),
                listeners: Mutex::new(Listeners::default()),
                repository,
            }),
        }
    }

    pub fn current(&self) -> Theme {
        *self
            .inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_dark(&self) -> bool {
        self.current() == Theme::Dark
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = {
            let mut current = self
                .inner
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = current.toggled();
            *current
        };
        self.after_change(next);
        next
    }

    /// Apply `theme`. Setting the theme already in effect is a no-op.
    pub fn set(&self, theme: Theme) {
        let changed = {
            let mut current = self
                .inner
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        };
        if changed {
            self.after_change(theme);
        }
    }

    /// Register `listener` for every future change.
    ///
    /// The listener stays attached until the returned subscription is
    /// dropped or [`ThemeSubscription::unsubscribe`] is called.
    pub fn on_change<F>(&self, listener: F) -> ThemeSubscription
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        let mut listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        ThemeSubscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    fn after_change(&self, theme: Theme) {
        info!("Theme changed to '{}'", theme);
        if let Err(e) = self.inner.repository.save(theme) {
            warn!("Failed to persist theme preference: {}", e);
        }

        // Listeners run outside the lock so they may subscribe or unsubscribe.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(theme);
        }
    }
}

/// Handle returned by [`ThemeStore::on_change`].
#[must_use = "dropping the subscription detaches the listener"]
pub struct ThemeSubscription {
    store: Weak<ThemeStoreInner>,
    id: u64,
}

impl ThemeSubscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};
    use crate::theme::InMemoryThemePreference;

    struct FailingPreference;

    impl ThemePreferenceRepository for FailingPreference {
        fn load(&self) -> Result<Option<Theme>> {
            Err(Error::Preference("disk unavailable".to_string()))
        }

        fn save(&self, _theme: Theme) -> Result<()> {
            Err(Error::Preference("disk unavailable".to_string()))
        }
    }

    fn recorder(store: &ThemeStore) -> (Arc<Mutex<Vec<Theme>>>, ThemeSubscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = store.on_change(move |theme| sink.lock().unwrap().push(theme));
        (seen, subscription)
    }

    #[test]
    fn test_initialises_from_persisted_preference() {
        let repo = Arc::new(InMemoryThemePreference::new(Some(Theme::Dark)));
        let store = ThemeStore::load(repo);
        assert_eq!(store.current(), Theme::Dark);
        assert!(store.is_dark());
    }

    #[test]
    fn test_defaults_to_light_without_preference() {
        let store = ThemeStore::load(Arc::new(InMemoryThemePreference::default()));
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_notifies() {
        let repo = Arc::new(InMemoryThemePreference::default());
        let store = ThemeStore::load(repo.clone());
        let (seen, _subscription) = recorder(&store);

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);

        assert_eq!(*seen.lock().unwrap(), vec![Theme::Dark, Theme::Light]);
        assert_eq!(repo.load().unwrap(), Some(Theme::Light));
    }

    #[test]
    fn test_set_same_theme_does_not_notify() {
        let store = ThemeStore::load(Arc::new(InMemoryThemePreference::default()));
        let (seen, _subscription) = recorder(&store);

        store.set(Theme::Light);
        assert!(seen.lock().unwrap().is_empty());

        store.set(Theme::Dark);
        assert_eq!(*seen.lock().unwrap(), vec![Theme::Dark]);
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let store = ThemeStore::load(Arc::new(InMemoryThemePreference::default()));
        let (kept, _kept_subscription) = recorder(&store);
        let (dropped, subscription) = recorder(&store);
        assert_eq!(store.listener_count(), 2);

        subscription.unsubscribe();
        assert_eq!(store.listener_count(), 1);

        store.toggle();
        assert_eq!(kept.lock().unwrap().len(), 1);
        assert!(dropped.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = ThemeStore::load(Arc::new(InMemoryThemePreference::default()));
        let other = store.clone();
        let (seen, _subscription) = recorder(&other);

        store.toggle();

        assert!(other.is_dark());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_persistence_failures_do_not_block_changes() {
        let store = ThemeStore::load(Arc::new(FailingPreference));
        assert_eq!(store.current(), Theme::Light);

        assert_eq!(store.toggle(), Theme::Dark);
        assert!(store.is_dark());
    }

    #[test]
    fn test_subscription_outliving_store_is_harmless() {
        let store = ThemeStore::load(Arc::new(InMemoryThemePreference::default()));
        let (_seen, subscription) = recorder(&store);
        drop(store);
        drop(subscription);
    }
}
