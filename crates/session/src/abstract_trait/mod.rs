mod auth;
mod interceptor;
mod navigator;
mod storage;

pub use self::auth::{AuthApiTrait, Credentials, DynAuthApi};
pub use self::interceptor::{DynUnauthorizedHandler, UnauthorizedHandlerTrait};
pub use self::navigator::{DynNavigator, NavigatorTrait, Notice, NoticeLevel};
pub use self::storage::{DynStorage, StorageAdapter};
