use tracing::debug;

use super::*;

impl CredentialResolver {
    /// Resolves a login attempt.
    ///
    /// Order: seed account, directory, email heuristic. An exact match on the
    /// seed email is reserved for the seed account.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let Ok(email) = NonEmptyString::new(email) else {
            return Ok(LoginOutcome::Failed(AuthFailure::ValidationError));
        };
        if password.is_empty() {
            return Ok(LoginOutcome::Failed(AuthFailure::ValidationError));
        }

        if let Some(seed) = &self.policy.seed_account
            && seed.email() == email.as_str()
        {
            if seed.password_matches(password) {
                debug!(email = %email, "resolved seed account");
                return Ok(LoginOutcome::Authenticated(seed.identity(email)));
            }

            return Ok(LoginOutcome::Failed(AuthFailure::InvalidCredentials));
        }

        if let Some(record) = self.user_directory.find_by_email(email.as_str()).await? {
            if self.policy.password_check == PasswordCheck::Strict
                && !self
                    .password_hasher
                    .verify_password(password, &record.password_secret)?
            {
                return Ok(LoginOutcome::Failed(AuthFailure::InvalidCredentials));
            }

            debug!(email = %email, role = %record.role, "resolved directory account");
            return Ok(LoginOutcome::Authenticated(record.identity()));
        }

        if !self.policy.fallback_provisioning {
            return Ok(LoginOutcome::Failed(AuthFailure::AccountNotFound));
        }

        let role = heuristic_role(email.as_str());
        debug!(email = %email, role = %role, "provisioned account from email heuristic");
        Ok(LoginOutcome::Authenticated(UserIdentity::new(email, None, role)))
    }
}
