use safacycle_application::PasswordHasher;
use safacycle_core::AppResult;

/// Stores passwords as given and compares them verbatim.
///
/// Matches the account store of the first mobile release. Use
/// [`crate::Argon2PasswordHasher`] for anything that outlives a dev session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextPasswordHasher;

impl PasswordHasher for PlaintextPasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(password.to_owned())
    }

    fn verify_password(&self, password: &str, secret: &str) -> AppResult<bool> {
        Ok(password == secret)
    }
}
