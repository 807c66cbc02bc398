mod preferences;
mod session;

pub use self::preferences::PreferenceStore;
pub use self::session::SessionStore;
