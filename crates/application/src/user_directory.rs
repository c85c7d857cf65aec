//! Account directory ports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use safacycle_core::{AppResult, NonEmptyString, Role, UserIdentity};

/// Registered account keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique key of the directory.
    pub email: NonEmptyString,
    /// Name given at signup.
    pub display_name: NonEmptyString,
    /// Output of the configured [`PasswordHasher`].
    pub password_secret: String,
    /// Role chosen at signup.
    pub role: Role,
}

impl UserRecord {
    /// Returns the session identity for this account.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(
            self.email.clone(),
            Some(self.display_name.as_str().to_owned()),
            self.role,
        )
    }
}

/// Repository port for the account directory.
///
/// Writes are last-write-wins on the email key.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds an account by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Inserts or replaces an account. Returns the replaced record, if any.
    async fn upsert(&self, record: UserRecord) -> AppResult<Option<UserRecord>>;

    /// Returns the number of registered accounts.
    async fn count(&self) -> AppResult<usize>;
}

/// Port for turning passwords into stored secrets and checking them.
pub trait PasswordHasher: Send + Sync {
    /// Produces the secret stored on the account.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Checks a password against a stored secret.
    fn verify_password(&self, password: &str, secret: &str) -> AppResult<bool>;
}
