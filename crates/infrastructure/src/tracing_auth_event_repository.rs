use async_trait::async_trait;
use safacycle_application::{AuthEvent, AuthEventRepository};
use safacycle_core::AppResult;
use tracing::info;

/// Emits auth events as structured log lines under the `auth_event` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuthEventRepository;

#[async_trait]
impl AuthEventRepository for TracingAuthEventRepository {
    async fn append_event(&self, event: AuthEvent) -> AppResult<()> {
        info!(
            target: "auth_event",
            subject = event.subject.as_deref().unwrap_or("-"),
            event_type = %event.event_type,
            outcome = %event.outcome,
            occurred_at = %event.occurred_at.to_rfc3339(),
            "auth event"
        );
        Ok(())
    }
}
