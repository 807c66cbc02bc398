use crate::{
    abstract_trait::{DynAuthApi, DynStorage},
    domain::{PersistedSession, Session, UserSummary},
};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

struct StoreState {
    session: Session,
    /// Bumped on every login and logout so late permission responses can be
    /// recognised and dropped.
    generation: u64,
}

/// Process-wide record of who is logged in and what they may do.
///
/// Every mutation is written through to the injected storage adapter; only
/// `user`, `isLoggedOut` and `permissions` are persisted.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
    storage: DynStorage<PersistedSession>,
    api: DynAuthApi,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.state.read().session)
            .field("storage", &"DynStorage")
            .field("api", &"DynAuthApi")
            .finish()
    }
}

impl SessionStore {
    /// Hydrates the store from whatever the storage adapter holds.
    pub fn restore(storage: DynStorage<PersistedSession>, api: DynAuthApi) -> Self {
        let session = storage.load().map(Session::from).unwrap_or_default();

        debug!(
            "Restored session (logged_out: {}, has_user: {}, has_permissions: {})",
            session.is_logged_out,
            session.user.is_some(),
            session.permissions.is_some()
        );

        Self {
            state: Arc::new(RwLock::new(StoreState {
                session,
                generation: 0,
            })),
            storage,
            api,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().session.clone()
    }

    pub fn is_logged_out(&self) -> bool {
        self.state.read().session.is_logged_out
    }

    pub fn api(&self) -> &DynAuthApi {
        &self.api
    }

    /// Records the user and starts loading their permissions in the background.
    /// The returned handle may be dropped; a failed load does not undo the login.
    pub fn login(&self, user: UserSummary) -> JoinHandle<()> {
        self.mutate(|state| {
            state.generation += 1;
            state.session = Session {
                user: Some(user),
                is_logged_out: false,
                permissions: None,
                is_loading_permissions: false,
            };
        });

        info!("User logged in, loading permissions");

        let store = self.clone();
        tokio::spawn(async move { store.load_permissions().await })
    }

    /// Invalidates the server-side session, then clears local state whether or
    /// not the remote call succeeded.
    pub async fn logout(&self) {
        // Logged out before the remote call, so a 401 from it is not an expiry.
        self.set_is_logged_out(true);

        if let Err(e) = self.api.logout().await {
            warn!("Remote logout failed, clearing local session anyway: {e}");
        }

        self.clear();
        info!("User logged out");
    }

    pub async fn logout_then<F>(&self, on_done: F)
    where
        F: FnOnce(),
    {
        self.logout().await;
        on_done();
    }

    pub fn set_is_logged_out(&self, value: bool) {
        self.mutate(|state| state.session.is_logged_out = value);
    }

    /// Flips the session to logged-out. Returns `false` when it already was,
    /// which lets concurrent `401`s agree on a single winner.
    pub fn mark_logged_out_if_active(&self) -> bool {
        self.mutate(|state| {
            if state.session.is_logged_out {
                return false;
            }
            state.session.is_logged_out = true;
            true
        })
    }

    /// Drops user and permissions locally without contacting the remote API.
    pub fn clear(&self) {
        self.mutate(|state| {
            state.generation += 1;
            state.session = Session::default();
        });
    }

    pub async fn load_permissions(&self) {
        let generation = {
            let mut state = self.state.write();
            let session = &state.session;

            if session.user.is_none() || session.is_logged_out {
                debug!("Skipping permission load: no active session");
                return;
            }
            if session.is_loading_permissions {
                debug!("Skipping permission load: already in flight");
                return;
            }

            state.session.is_loading_permissions = true;
            state.generation
        };

        let result = self.api.fetch_permissions().await;

        let mut state = self.state.write();
        if state.generation != generation {
            debug!("Discarding permissions fetched for a previous session");
            return;
        }

        state.session.is_loading_permissions = false;

        match result {
            Ok(permissions) if !state.session.is_logged_out => {
                debug!("Loaded {} permissions", permissions.effective.len());
                state.session.permissions = Some(permissions);
                self.persist(&state.session);
            }
            Ok(_) => debug!("Discarding permissions: session ended during load"),
            Err(e) => error!("Failed to load permissions, keeping cached set: {e}"),
        }
    }

    pub fn has_permission(&self, id: &str) -> bool {
        self.state.read().session.has_permission(id)
    }

    pub fn has_any_permission<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.state.read().session.has_any_permission(ids)
    }

    pub fn has_all_permissions<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.state.read().session.has_all_permissions(ids)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.state.write();
        let result = f(&mut *state);
        self.persist(&state.session);
        result
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.storage.save(&PersistedSession::from(session)) {
            error!("Failed to persist session: {e:#}");
        }
    }
}
