use crate::{
    abstract_trait::{DynAuthApi, DynNavigator, DynUnauthorizedHandler},
    client::{ApiClient, ClientConfig, SessionExpiryHandler},
    domain::{PersistedSession, UiPreferences},
    loader::PermissionInitializer,
    service::{AnalyticsService, AuthApiService},
    storage::{FileStorage, PREFERENCES_NAMESPACE, SESSION_NAMESPACE},
    store::{PreferenceStore, SessionStore},
};
use shared::errors::ClientError;
use std::{path::Path, sync::Arc};

pub const LOGIN_PATH: &str = "/login";

/// Everything one client process needs, wired together.
#[derive(Clone)]
pub struct SessionContainer {
    pub client: ApiClient,
    pub auth_api: DynAuthApi,
    pub session: SessionStore,
    pub preferences: PreferenceStore,
    pub analytics: AnalyticsService,
    // Holds the only strong reference to the handler the client points at.
    _expiry_handler: DynUnauthorizedHandler,
}

impl std::fmt::Debug for SessionContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContainer")
            .field("client", &self.client)
            .field("auth_api", &"DynAuthApi")
            .field("session", &self.session)
            .field("preferences", &"PreferenceStore")
            .field("expiry_handler", &"DynUnauthorizedHandler")
            .finish()
    }
}

impl SessionContainer {
    /// Builds the container with file-backed storage under `profile_dir`.
    pub fn new(
        config: &ClientConfig,
        profile_dir: impl AsRef<Path>,
        navigator: DynNavigator,
    ) -> Result<Self, ClientError> {
        let client = ApiClient::new(config)?;
        let auth_api: DynAuthApi = Arc::new(AuthApiService::new(client.clone()));

        let session = SessionStore::restore(
            Arc::new(FileStorage::<PersistedSession>::new(
                profile_dir.as_ref(),
                SESSION_NAMESPACE,
            )),
            auth_api.clone(),
        );
        let preferences = PreferenceStore::restore(Arc::new(FileStorage::<UiPreferences>::new(
            profile_dir.as_ref(),
            PREFERENCES_NAMESPACE,
        )));

        let expiry_handler: DynUnauthorizedHandler = Arc::new(SessionExpiryHandler::new(
            session.clone(),
            navigator,
            LOGIN_PATH,
        ));
        client.set_unauthorized_handler(&expiry_handler);

        let analytics = AnalyticsService::new(client.clone());

        Ok(Self {
            client,
            auth_api,
            session,
            preferences,
            analytics,
            _expiry_handler: expiry_handler,
        })
    }

    pub fn permission_initializer(&self) -> PermissionInitializer {
        PermissionInitializer::new(self.session.clone())
    }
}
