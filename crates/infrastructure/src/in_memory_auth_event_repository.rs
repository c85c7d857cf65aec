use async_trait::async_trait;
use safacycle_application::{AuthEvent, AuthEventRepository};
use safacycle_core::AppResult;
use tokio::sync::RwLock;

/// Keeps auth events in memory, oldest first.
#[derive(Debug, Default)]
pub struct InMemoryAuthEventRepository {
    events: RwLock<Vec<AuthEvent>>,
}

impl InMemoryAuthEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event.
    pub async fn events(&self) -> Vec<AuthEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuthEventRepository for InMemoryAuthEventRepository {
    async fn append_event(&self, event: AuthEvent) -> AppResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
