use crate::domain::Session;

/// What a guarded region requires. Every selector that is present must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    pub role: Option<String>,
    pub permission: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub require_all: bool,
}

/// Decides whether `session` satisfies `selectors`.
///
/// Checks run in order: legacy role, single permission, permission list. A
/// logged-out session fails every selector regardless of cached data; no
/// selectors at all always passes.
pub fn evaluate(selectors: &Selectors, session: &Session) -> bool {
    if let Some(role) = &selectors.role
        && (session.is_logged_out || session.role() != Some(role.as_str()))
    {
        return false;
    }

    if let Some(permission) = &selectors.permission
        && !session.has_permission(permission)
    {
        return false;
    }

    if let Some(permissions) = &selectors.permissions {
        let granted = if selectors.require_all {
            session.has_all_permissions(permissions.as_slice())
        } else {
            session.has_any_permission(permissions.as_slice())
        };
        if !granted {
            return false;
        }
    }

    true
}

/// Builder over [`Selectors`] for call sites that gate some output.
#[derive(Debug, Clone, Default)]
pub struct PermissionGuard {
    selectors: Selectors,
}

impl PermissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(id: impl Into<String>) -> Self {
        Self::new().and_permission(id)
    }

    pub fn any_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().and_permissions(ids, false)
    }

    pub fn all_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().and_permissions(ids, true)
    }

    pub fn role(role: impl Into<String>) -> Self {
        Self::new().and_role(role)
    }

    pub fn and_permission(mut self, id: impl Into<String>) -> Self {
        self.selectors.permission = Some(id.into());
        self
    }

    pub fn and_permissions<I, S>(mut self, ids: I, require_all: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors.permissions = Some(ids.into_iter().map(Into::into).collect());
        self.selectors.require_all = require_all;
        self
    }

    pub fn and_role(mut self, role: impl Into<String>) -> Self {
        self.selectors.role = Some(role.into());
        self
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    pub fn allows(&self, session: &Session) -> bool {
        evaluate(&self.selectors, session)
    }

    /// Produces `children()` when allowed, `fallback()` otherwise.
    pub fn render<T>(
        &self,
        session: &Session,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.allows(session) {
            children()
        } else {
            fallback()
        }
    }

    /// Like [`PermissionGuard::render`] with an empty fallback.
    pub fn render_or_nothing<T>(
        &self,
        session: &Session,
        children: impl FnOnce() -> T,
    ) -> Option<T> {
        self.allows(session).then(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::PermissionSet, test_support::user};

    fn session(role: &str, perms: &[&str]) -> Session {
        Session {
            user: Some(user(role)),
            is_logged_out: false,
            permissions: Some(PermissionSet::new(perms.iter().copied())),
            is_loading_permissions: false,
        }
    }

    #[test]
    fn no_selectors_always_render() {
        assert!(PermissionGuard::new().allows(&Session::default()));
    }

    #[test]
    fn single_permission() {
        let s = session("editor", &["blog:write"]);
        assert!(PermissionGuard::permission("blog:write").allows(&s));
        assert!(!PermissionGuard::permission("blog:delete").allows(&s));
    }

    #[test]
    fn any_versus_all() {
        let s = session("editor", &["blog:write", "blog:read"]);
        assert!(PermissionGuard::any_of(["blog:delete", "blog:read"]).allows(&s));
        assert!(!PermissionGuard::all_of(["blog:delete", "blog:read"]).allows(&s));
        assert!(PermissionGuard::all_of(["blog:write", "blog:read"]).allows(&s));
    }

    #[test]
    fn empty_permission_list_fails_closed() {
        let s = session("editor", &["blog:write"]);
        let empty: Vec<String> = Vec::new();
        assert!(!PermissionGuard::any_of(empty.clone()).allows(&s));
        assert!(!PermissionGuard::all_of(empty).allows(&s));
    }

    #[test]
    fn role_mismatch_short_circuits() {
        let s = session("editor", &["course:create"]);
        let guard = PermissionGuard::role("admin").and_permission("course:create");
        assert!(!guard.allows(&s));

        let admin = session("admin", &["course:create"]);
        assert!(guard.allows(&admin));
    }

    #[test]
    fn role_requires_a_user() {
        assert!(!PermissionGuard::role("admin").allows(&Session::default()));
    }

    #[test]
    fn all_selectors_are_anded() {
        let s = session("admin", &["course:create", "course:read"]);
        let guard = PermissionGuard::role("admin")
            .and_permission("course:create")
            .and_permissions(["course:delete"], false);
        assert!(!guard.allows(&s));
    }

    #[test]
    fn logged_out_session_is_denied_despite_cache() {
        let mut s = session("admin", &["course:create"]);
        s.is_logged_out = true;

        assert!(!PermissionGuard::permission("course:create").allows(&s));
        assert!(!PermissionGuard::role("admin").allows(&s));
    }

    #[test]
    fn render_picks_fallback() {
        let s = session("editor", &[]);
        let guard = PermissionGuard::permission("course:create");

        assert_eq!(guard.render(&s, || "form", || "locked"), "locked");
        assert_eq!(guard.render_or_nothing(&s, || "form"), None);
    }
}
