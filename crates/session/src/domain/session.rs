use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of the logged-in user as returned by the remote API. Only `role`
/// is interpreted here; every other field is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserSummary {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.profile.get(name)
    }
}

/// Server-resolved permission identifiers. Replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    #[serde(default)]
    pub effective: Vec<String>,
}

impl PermissionSet {
    pub fn new<I, S>(effective: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            effective: effective.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.effective.iter().any(|p| p == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<UserSummary>,
    pub is_logged_out: bool,
    pub permissions: Option<PermissionSet>,
    pub is_loading_permissions: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_logged_out: true,
            permissions: None,
            is_loading_permissions: false,
        }
    }
}

impl Session {
    /// Permission set usable for access decisions. `None` while logged out,
    /// so stale cached permissions never grant anything.
    fn usable_permissions(&self) -> Option<&PermissionSet> {
        if self.is_logged_out {
            return None;
        }
        self.permissions.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_logged_out && self.user.is_some()
    }

    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.role.as_deref())
    }

    pub fn has_permission(&self, id: &str) -> bool {
        self.usable_permissions()
            .is_some_and(|set| set.contains(id))
    }

    /// False for an empty list.
    pub fn has_any_permission<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.usable_permissions()
            .is_some_and(|set| ids.iter().any(|id| set.contains(id.as_ref())))
    }

    /// False for an empty list.
    pub fn has_all_permissions<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        !ids.is_empty()
            && self
                .usable_permissions()
                .is_some_and(|set| ids.iter().all(|id| set.contains(id.as_ref())))
    }
}

/// The subset of [`Session`] written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user: Option<UserSummary>,
    pub is_logged_out: bool,
    pub permissions: Option<PermissionSet>,
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            is_logged_out: session.is_logged_out,
            permissions: session.permissions.clone(),
        }
    }
}

impl From<PersistedSession> for Session {
    fn from(persisted: PersistedSession) -> Self {
        Self {
            user: persisted.user,
            is_logged_out: persisted.is_logged_out,
            permissions: persisted.permissions,
            is_loading_permissions: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in(perms: Option<&[&str]>) -> Session {
        Session {
            user: Some(UserSummary::default()),
            is_logged_out: false,
            permissions: perms.map(|p| PermissionSet::new(p.iter().copied())),
            is_loading_permissions: false,
        }
    }

    #[test]
    fn missing_permission_set_fails_closed() {
        let session = logged_in(None);
        assert!(!session.has_permission("course:create"));
        assert!(!session.has_any_permission(&["course:create"]));
        assert!(!session.has_all_permissions(&["course:create"]));
    }

    #[test]
    fn unknown_identifier_is_denied() {
        let session = logged_in(Some(&["course:read"]));
        assert!(session.has_permission("course:read"));
        assert!(!session.has_permission("course:delete"));
    }

    #[test]
    fn empty_lists_are_denied() {
        let session = logged_in(Some(&["course:read"]));
        let empty: [&str; 0] = [];
        assert!(!session.has_any_permission(&empty));
        assert!(!session.has_all_permissions(&empty));
    }

    #[test]
    fn any_and_all() {
        let session = logged_in(Some(&["course:read", "course:create"]));
        assert!(session.has_any_permission(&["blog:write", "course:read"]));
        assert!(!session.has_all_permissions(&["blog:write", "course:read"]));
        assert!(session.has_all_permissions(&["course:create", "course:read"]));
    }

    #[test]
    fn logged_out_flag_hides_cached_permissions() {
        let mut session = logged_in(Some(&["course:read"]));
        session.is_logged_out = true;
        assert!(!session.has_permission("course:read"));
        assert!(!session.has_any_permission(&["course:read"]));
    }

    #[test]
    fn persisted_blob_skips_loading_flag() {
        let mut session = logged_in(Some(&["course:read"]));
        session.is_loading_permissions = true;

        let value = serde_json::to_value(PersistedSession::from(&session)).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"user"));
        assert!(keys.contains(&"isLoggedOut"));
        assert!(keys.contains(&"permissions"));

        let restored: Session = serde_json::from_value::<PersistedSession>(value)
            .unwrap()
            .into();
        assert!(!restored.is_loading_permissions);
    }

    #[test]
    fn user_profile_fields_are_preserved() {
        let user: UserSummary = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "ada@example.com",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_eq!(user.field("id"), Some(&serde_json::json!(7)));
        assert!(user.field("role").is_none());
    }
}
