use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use safacycle_core::AppResult;

/// Authentication event payload for security analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    /// Email the attempt was made with, if any.
    pub subject: Option<String>,
    /// Stable event type identifier.
    pub event_type: String,
    /// Event outcome label (success or failure).
    pub outcome: String,
    /// When the event happened.
    pub occurred_at: DateTime<Utc>,
}

impl AuthEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn now(
        subject: Option<&str>,
        event_type: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.map(str::to_owned),
            event_type: event_type.into(),
            outcome: outcome.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Repository port for auth event persistence.
#[async_trait]
pub trait AuthEventRepository: Send + Sync {
    /// Appends an auth event entry.
    async fn append_event(&self, event: AuthEvent) -> AppResult<()>;
}

/// Application service for auth event recording.
#[derive(Clone)]
pub struct AuthEventService {
    repository: Arc<dyn AuthEventRepository>,
}

impl AuthEventService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthEventRepository>) -> Self {
        Self { repository }
    }

    /// Persists an auth event.
    pub async fn record_event(&self, event: AuthEvent) -> AppResult<()> {
        self.repository.append_event(event).await
    }
}
