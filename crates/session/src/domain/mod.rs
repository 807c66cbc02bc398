mod preferences;
mod session;

pub use self::preferences::{Theme, UiPreferences};
pub use self::session::{PermissionSet, PersistedSession, Session, UserSummary};
