use std::sync::Arc;

pub type DynNavigator = Arc<dyn NavigatorTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// The user-facing surface: toast-style notices and page navigation.
pub trait NavigatorTrait {
    fn notify(&self, notice: Notice);
    fn redirect(&self, path: &str);
}
