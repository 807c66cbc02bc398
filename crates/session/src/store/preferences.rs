use crate::{
    abstract_trait::DynStorage,
    domain::{Theme, UiPreferences},
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

/// Sidebar and theme choices, persisted independently of the auth session.
#[derive(Clone)]
pub struct PreferenceStore {
    state: Arc<RwLock<UiPreferences>>,
    storage: DynStorage<UiPreferences>,
}

impl PreferenceStore {
    pub fn restore(storage: DynStorage<UiPreferences>) -> Self {
        let prefs = storage.load().unwrap_or_default();
        Self {
            state: Arc::new(RwLock::new(prefs)),
            storage,
        }
    }

    pub fn preferences(&self) -> UiPreferences {
        self.state.read().clone()
    }

    /// Returns the new collapsed state.
    pub fn toggle_sidebar(&self) -> bool {
        self.mutate(|prefs| {
            prefs.sidebar_collapsed = !prefs.sidebar_collapsed;
            prefs.sidebar_collapsed
        })
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.mutate(|prefs| prefs.sidebar_collapsed = collapsed);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.mutate(|prefs| prefs.theme = theme);
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut UiPreferences) -> R) -> R {
        let mut prefs = self.state.write();
        let result = f(&mut *prefs);
        if let Err(e) = self.storage.save(&prefs) {
            error!("Failed to persist UI preferences: {e:#}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{abstract_trait::StorageAdapter, storage::MemoryStorage};

    #[test]
    fn defaults_to_expanded_sidebar_and_system_theme() {
        let store = PreferenceStore::restore(Arc::new(MemoryStorage::new()));
        assert_eq!(store.preferences(), UiPreferences::default());
        assert_eq!(store.preferences().theme, Theme::System);
    }

    #[test]
    fn every_change_is_persisted() {
        let storage = MemoryStorage::new();
        let store = PreferenceStore::restore(Arc::new(storage.clone()));

        assert!(store.toggle_sidebar());
        store.set_theme(Theme::Dark);

        assert_eq!(
            storage.load(),
            Some(UiPreferences {
                sidebar_collapsed: true,
                theme: Theme::Dark,
            })
        );

        let reopened = PreferenceStore::restore(Arc::new(storage));
        assert!(reopened.preferences().sidebar_collapsed);
        assert!(!reopened.toggle_sidebar());
    }

    #[test]
    fn theme_serializes_lowercase() {
        let json = serde_json::to_value(UiPreferences {
            sidebar_collapsed: false,
            theme: Theme::Light,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sidebarCollapsed": false, "theme": "light" })
        );
    }
}
