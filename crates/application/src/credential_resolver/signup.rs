use tracing::{debug, info};

use crate::UserRecord;

use super::*;

impl CredentialResolver {
    /// Registers an account, replacing any account with the same email.
    ///
    /// Only `driver` and `user` may be requested.
    pub async fn signup(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<SignupOutcome> {
        let (Ok(display_name), Ok(email)) =
            (NonEmptyString::new(display_name), NonEmptyString::new(email))
        else {
            return Ok(SignupOutcome::Rejected(AuthFailure::ValidationError));
        };
        if password.is_empty() || !role.is_self_assignable() {
            return Ok(SignupOutcome::Rejected(AuthFailure::ValidationError));
        }

        let record = UserRecord {
            email,
            display_name,
            password_secret: self.password_hasher.hash_password(password)?,
            role,
        };
        let identity = record.identity();

        match self.user_directory.upsert(record).await? {
            Some(previous) => info!(
                email = %identity.email(),
                previous_role = %previous.role,
                role = %role,
                "replaced existing account"
            ),
            None => debug!(email = %identity.email(), role = %role, "registered account"),
        }

        Ok(SignupOutcome::Registered(identity))
    }
}
