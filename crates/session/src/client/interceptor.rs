use crate::{
    abstract_trait::{DynNavigator, Notice, UnauthorizedHandlerTrait},
    store::SessionStore,
};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please log in again";

/// Global reaction to a `401`: mark logged out, tell the user, send them to
/// the login page and drop the cached session. Runs once per session.
pub struct SessionExpiryHandler {
    store: SessionStore,
    navigator: DynNavigator,
    login_path: String,
}

impl SessionExpiryHandler {
    pub fn new(
        store: SessionStore,
        navigator: DynNavigator,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
        }
    }
}

#[async_trait]
impl UnauthorizedHandlerTrait for SessionExpiryHandler {
    async fn on_unauthorized(&self) {
        if !self.store.mark_logged_out_if_active() {
            debug!("Ignoring 401: session already marked logged out");
            return;
        }

        warn!("Session expired, redirecting to {}", self.login_path);

        self.navigator.notify(Notice::error(SESSION_EXPIRED_MESSAGE));
        self.navigator.redirect(&self.login_path);
        self.store.clear();
    }
}
