use crate::store::SessionStore;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::debug;

/// Fetches permissions for a session that was restored from storage rather
/// than created by a fresh login. One instance per mount.
#[derive(Debug)]
pub struct PermissionInitializer {
    store: SessionStore,
    triggered: AtomicBool,
}

impl PermissionInitializer {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            triggered: AtomicBool::new(false),
        }
    }

    /// Starts a background load when the session is authenticated but has no
    /// permissions yet and nothing is already loading. Repeat calls on the same
    /// instance never start a second load.
    pub fn on_mount(&self) -> Option<JoinHandle<()>> {
        let session = self.store.snapshot();

        let needs_load = session.user.is_some()
            && !session.is_logged_out
            && session.permissions.is_none()
            && !session.is_loading_permissions;

        if !needs_load {
            return None;
        }

        if self.triggered.swap(true, Ordering::SeqCst) {
            debug!("Permission initializer already triggered");
            return None;
        }

        debug!("Restored session has no permissions, loading");

        let store = self.store.clone();
        Some(tokio::spawn(async move { store.load_permissions().await }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PermissionSet, PersistedSession},
        storage::MemoryStorage,
        test_support::{FakeAuthApi, user},
    };
    use std::sync::{Arc, atomic::Ordering};

    fn restored(
        api: Arc<FakeAuthApi>,
        is_logged_out: bool,
        permissions: Option<PermissionSet>,
    ) -> SessionStore {
        let storage = MemoryStorage::with_state(PersistedSession {
            user: Some(user("admin")),
            is_logged_out,
            permissions,
        });
        SessionStore::restore(Arc::new(storage), api)
    }

    #[tokio::test]
    async fn loads_once_for_restored_session() {
        let api = FakeAuthApi::granting(&["course:read"]);
        let store = restored(api.clone(), false, None);
        let initializer = PermissionInitializer::new(store.clone());

        initializer.on_mount().expect("load should start").await.unwrap();
        assert!(initializer.on_mount().is_none());

        assert!(store.has_permission("course:read"));
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rerender_during_load_does_not_refetch() {
        let api = FakeAuthApi::granting(&["course:read"]).gated();
        let store = restored(api.clone(), false, None);
        let initializer = PermissionInitializer::new(store.clone());

        let handle = initializer.on_mount().expect("load should start");
        api.wait_for_fetch().await;

        assert!(initializer.on_mount().is_none());
        assert!(PermissionInitializer::new(store.clone()).on_mount().is_none());

        api.release();
        handle.await.unwrap();
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn skips_when_permissions_present_or_logged_out() {
        let api = FakeAuthApi::granting(&["course:read"]);

        let loaded = restored(api.clone(), false, Some(PermissionSet::new(["x"])));
        assert!(PermissionInitializer::new(loaded).on_mount().is_none());

        let logged_out = restored(api.clone(), true, None);
        assert!(PermissionInitializer::new(logged_out).on_mount().is_none());

        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 0);
    }
}
