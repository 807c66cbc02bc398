use crate::client::ApiClient;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use shared::errors::ClientError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event: String,
    pub path: String,
    pub occurred_at: String,
}

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    client: ApiClient,
}

impl AnalyticsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn capture(&self, event: &AnalyticsEvent) -> Result<(), ClientError> {
        let _: Value = self.client.post("/analytics/events", event).await?;
        Ok(())
    }

    /// Sends `event` without waiting for the outcome. Failures are logged and dropped.
    pub fn dispatch(&self, event: AnalyticsEvent) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.capture(&event).await {
                debug!("Dropped analytics event {}: {e}", event.event);
            }
        })
    }

    pub fn page_view_tracker(&self) -> PageViewTracker {
        PageViewTracker {
            analytics: self.clone(),
            sent: AtomicBool::new(false),
        }
    }
}

/// Records one page view per mounted page.
#[derive(Debug)]
pub struct PageViewTracker {
    analytics: AnalyticsService,
    sent: AtomicBool,
}

impl PageViewTracker {
    /// `None` when this tracker already sent its page view.
    pub fn track(&self, path: &str) -> Option<JoinHandle<()>> {
        if self.sent.swap(true, Ordering::SeqCst) {
            return None;
        }

        Some(self.analytics.dispatch(AnalyticsEvent {
            event: "page_view".into(),
            path: path.to_string(),
            occurred_at: Utc::now().to_rfc3339(),
        }))
    }
}
