//! Client-side authorization boundary: who is logged in, what they may do,
//! and how remote calls react when the session expires.

pub mod abstract_trait;
pub mod client;
pub mod di;
pub mod domain;
pub mod guard;
pub mod loader;
pub mod service;
pub mod storage;
pub mod store;

pub use self::di::SessionContainer;
pub use self::guard::{PermissionGuard, Selectors, evaluate};
pub use self::loader::PermissionInitializer;
pub use self::store::{PreferenceStore, SessionStore};

#[cfg(test)]
mod test_support;
