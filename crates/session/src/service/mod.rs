mod analytics;
mod auth;

pub use self::analytics::{AnalyticsEvent, AnalyticsService, PageViewTracker};
pub use self::auth::AuthApiService;
