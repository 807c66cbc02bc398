use crate::{
    abstract_trait::{AuthApiTrait, Credentials, NavigatorTrait, Notice},
    domain::{PermissionSet, UserSummary},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::errors::ClientError;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::{Notify, Semaphore};

pub fn user(role: &str) -> UserSummary {
    let mut user = UserSummary {
        role: Some(role.to_string()),
        ..Default::default()
    };
    user.profile
        .insert("email".into(), format!("{role}@example.com").into());
    user
}

pub struct FakeAuthApi {
    permissions: Result<PermissionSet, u16>,
    gate: Option<Semaphore>,
    fetch_started: Notify,
    pub fetch_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub fail_logout: AtomicBool,
}

impl FakeAuthApi {
    fn build(permissions: Result<PermissionSet, u16>) -> Self {
        Self {
            permissions,
            gate: None,
            fetch_started: Notify::new(),
            fetch_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            fail_logout: AtomicBool::new(false),
        }
    }

    pub fn granting(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self::build(Ok(PermissionSet::new(ids.iter().copied()))))
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self::build(Err(status)))
    }

    /// Holds every permission fetch until [`FakeAuthApi::release`] is called.
    pub fn gated(self: Arc<Self>) -> Arc<Self> {
        let mut api = Arc::into_inner(self).expect("gate before sharing the fake");
        api.gate = Some(Semaphore::new(0));
        Arc::new(api)
    }

    pub async fn wait_for_fetch(&self) {
        self.fetch_started.notified().await;
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }
}

#[async_trait]
impl AuthApiTrait for FakeAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<UserSummary, ClientError> {
        Ok(user("admin"))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: None,
            });
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<UserSummary, ClientError> {
        Ok(user("admin"))
    }

    async fn fetch_permissions(&self) -> Result<PermissionSet, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_started.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        match &self.permissions {
            Ok(set) => Ok(set.clone()),
            Err(status) => Err(ClientError::Api {
                status: *status,
                message: Some("permission service unavailable".into()),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub notices: Mutex<Vec<Notice>>,
    pub redirects: Mutex<Vec<String>>,
}

impl NavigatorTrait for RecordingNavigator {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }

    fn redirect(&self, path: &str) {
        self.redirects.lock().push(path.to_string());
    }
}
