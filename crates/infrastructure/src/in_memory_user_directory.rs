use std::collections::HashMap;

use async_trait::async_trait;
use safacycle_application::{UserDirectory, UserRecord};
use safacycle_core::AppResult;
use tokio::sync::RwLock;

/// Process-lifetime account directory. Empty at startup.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn upsert(&self, record: UserRecord) -> AppResult<Option<UserRecord>> {
        let key = record.email.as_str().to_owned();
        Ok(self.records.write().await.insert(key, record))
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use safacycle_core::{NonEmptyString, Role};

    use super::*;

    fn record(email: &str, name: &str, role: Role) -> AppResult<UserRecord> {
        Ok(UserRecord {
            email: NonEmptyString::new(email)?,
            display_name: NonEmptyString::new(name)?,
            password_secret: "pw123".to_owned(),
            role,
        })
    }

    #[tokio::test]
    async fn starts_empty() -> AppResult<()> {
        let directory = InMemoryUserDirectory::new();
        assert_eq!(directory.count().await?, 0);
        assert!(directory.find_by_email("alice@x.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn upsert_is_last_write_wins() -> AppResult<()> {
        let directory = InMemoryUserDirectory::new();

        let first = directory
            .upsert(record("alice@x.com", "Alice", Role::Driver)?)
            .await?;
        let second = directory
            .upsert(record("alice@x.com", "Alicia", Role::User)?)
            .await?;

        assert!(first.is_none());
        assert_eq!(second.map(|previous| previous.role), Some(Role::Driver));
        let stored = directory.find_by_email("alice@x.com").await?;
        assert_eq!(
            stored.map(|record| record.display_name.to_string()),
            Some("Alicia".to_owned())
        );
        assert_eq!(directory.count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() -> AppResult<()> {
        let directory = InMemoryUserDirectory::new();
        directory
            .upsert(record("alice@x.com", "Alice", Role::User)?)
            .await?;

        assert!(directory.find_by_email("Alice@x.com").await?.is_none());
        Ok(())
    }
}
