mod file;
mod memory;

pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;

pub const SESSION_NAMESPACE: &str = "auth-session";
pub const PREFERENCES_NAMESPACE: &str = "ui-preferences";
