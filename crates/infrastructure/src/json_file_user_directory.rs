//! Account directory persisted as a JSON array on disk.
//!
//! The whole file is loaded on open and rewritten on every upsert. Writes go
//! to a sibling temporary file first and are renamed into place.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use safacycle_application::{UserDirectory, UserRecord};
use safacycle_core::{AppError, AppResult};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// File-backed account directory.
#[derive(Debug)]
pub struct JsonFileUserDirectory {
    path: PathBuf,
    records: RwLock<HashMap<String, UserRecord>>,
}

impl JsonFileUserDirectory {
    /// Opens the directory at `path`. A missing file is an empty directory.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let records = load_records(&path).await?;

        info!(
            path = %path.display(),
            accounts = records.len(),
            "opened user directory"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

#[async_trait]
impl UserDirectory for JsonFileUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn upsert(&self, record: UserRecord) -> AppResult<Option<UserRecord>> {
        let mut records = self.records.write().await;
        let key = record.email.as_str().to_owned();

        let previous = records.insert(key.clone(), record);
        if let Err(error) = store_records(&self.path, &records).await {
            // Keep memory consistent with what is on disk.
            match previous.clone() {
                Some(previous) => records.insert(key, previous),
                None => records.remove(&key),
            };
            return Err(error);
        }

        debug!(path = %self.path.display(), accounts = records.len(), "persisted user directory");
        Ok(previous)
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.records.read().await.len())
    }
}

async fn load_records(path: &Path) -> AppResult<HashMap<String, UserRecord>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(error) => {
            return Err(AppError::Internal(format!(
                "failed to read user directory '{}': {error}",
                path.display()
            )));
        }
    };

    let records: Vec<UserRecord> = serde_json::from_slice(&bytes).map_err(|error| {
        AppError::Internal(format!(
            "failed to parse user directory '{}': {error}",
            path.display()
        ))
    })?;

    Ok(records
        .into_iter()
        .map(|record| (record.email.as_str().to_owned(), record))
        .collect())
}

async fn store_records(path: &Path, records: &HashMap<String, UserRecord>) -> AppResult<()> {
    let mut sorted: Vec<&UserRecord> = records.values().collect();
    sorted.sort_by(|left, right| left.email.as_str().cmp(right.email.as_str()));

    let bytes = serde_json::to_vec_pretty(&sorted).map_err(|error| {
        AppError::Internal(format!("failed to serialize user directory: {error}"))
    })?;

    let temporary = path.with_extension("json.tmp");
    tokio::fs::write(&temporary, bytes).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to write user directory '{}': {error}",
            temporary.display()
        ))
    })?;
    if let Err(error) = tokio::fs::rename(&temporary, path).await {
        if let Err(cleanup_error) = tokio::fs::remove_file(&temporary).await {
            warn!(
                path = %temporary.display(),
                error = %cleanup_error,
                "failed to remove temporary user directory file"
            );
        }
        return Err(AppError::Internal(format!(
            "failed to replace user directory '{}': {error}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use safacycle_core::{NonEmptyString, Role};

    use super::*;

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn scratch_path() -> PathBuf {
        let index = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "safacycle-users-{}-{index}.json",
            std::process::id()
        ))
    }

    fn record(email: &str, name: &str, role: Role) -> AppResult<UserRecord> {
        Ok(UserRecord {
            email: NonEmptyString::new(email)?,
            display_name: NonEmptyString::new(name)?,
            password_secret: "pw123".to_owned(),
            role,
        })
    }

    #[tokio::test]
    async fn missing_file_opens_empty() -> AppResult<()> {
        let directory = JsonFileUserDirectory::open(scratch_path()).await?;
        assert_eq!(directory.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn records_survive_reopening() -> AppResult<()> {
        let path = scratch_path();

        let directory = JsonFileUserDirectory::open(&path).await?;
        directory
            .upsert(record("alice@x.com", "Alice", Role::Driver)?)
            .await?;
        directory
            .upsert(record("alice@x.com", "Alicia", Role::User)?)
            .await?;
        drop(directory);

        let reopened = JsonFileUserDirectory::open(&path).await?;
        let stored = reopened.find_by_email("alice@x.com").await?;
        assert_eq!(stored.map(|record| record.role), Some(Role::User));
        assert_eq!(reopened.count().await?, 1);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> AppResult<()> {
        let path = scratch_path();
        tokio::fs::write(&path, b"not json")
            .await
            .map_err(|error| AppError::Internal(error.to_string()))?;

        let result = JsonFileUserDirectory::open(&path).await;
        assert!(matches!(result, Err(AppError::Internal(_))));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_replace_leaves_no_temporary_file() -> AppResult<()> {
        let path = scratch_path();
        // A non-empty directory at the target path makes the rename fail.
        tokio::fs::create_dir_all(path.join("occupied"))
            .await
            .map_err(|error| AppError::Internal(error.to_string()))?;

        let mut records = HashMap::new();
        records.insert(
            "alice@x.com".to_owned(),
            record("alice@x.com", "Alice", Role::User)?,
        );
        let result = store_records(&path, &records).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(!path.with_extension("json.tmp").exists());

        let _ = tokio::fs::remove_dir_all(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn blank_email_in_file_is_rejected() -> AppResult<()> {
        let path = scratch_path();
        let contents =
            br#"[{"email":"","display_name":"Ghost","password_secret":"pw","role":"user"}]"#;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|error| AppError::Internal(error.to_string()))?;

        assert!(JsonFileUserDirectory::open(&path).await.is_err());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
