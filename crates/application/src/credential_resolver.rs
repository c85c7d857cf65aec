//! Credential resolution for login and signup.
//!
//! Decides the outcome of an attempt without touching session state. Failures
//! that come from the caller's input are reported as outcomes; `Err` is kept
//! for adapter failures only.

mod login;
mod signup;


use std::sync::Arc;

use safacycle_core::{AppError, AppResult, NonEmptyString, Role, UserIdentity};

use crate::{PasswordHasher, UserDirectory};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How a known account's password is checked on login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordCheck {
    /// Any non-empty password authenticates a known email.
    #[default]
    Legacy,
    /// The password must verify against the stored secret.
    Strict,
}

impl PasswordCheck {
    /// Parses a configuration value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(AppError::Validation(format!(
                "unknown password check '{value}'"
            ))),
        }
    }
}

/// Fixed account resolved before the directory is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    email: String,
    password: String,
    display_name: String,
    role: Role,
}

impl SeedAccount {
    /// Creates a seed account. Email and password match exactly.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// The development admin account shipped with the mobile app.
    #[must_use]
    pub fn legacy_admin() -> Self {
        Self::new("admin123@gmail.com", "Admin123", "Admin", Role::Admin)
    }

    /// Returns the reserved email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    fn identity(&self, email: NonEmptyString) -> UserIdentity {
        UserIdentity::new(email, Some(self.display_name.clone()), self.role)
    }
}

/// Behaviour switches for credential resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Password checking mode for directory accounts.
    pub password_check: PasswordCheck,
    /// Whether unknown emails are provisioned from the email heuristic.
    pub fallback_provisioning: bool,
    /// Seed account checked before the directory, if any.
    pub seed_account: Option<SeedAccount>,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            password_check: PasswordCheck::Legacy,
            fallback_provisioning: true,
            seed_account: Some(SeedAccount::legacy_admin()),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why an attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// A required field was empty or a value was not allowed.
    ValidationError,
    /// The password did not match.
    InvalidCredentials,
    /// No account exists and fallback provisioning is off.
    AccountNotFound,
}

impl AuthFailure {
    /// Returns the stable label used in auth events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::InvalidCredentials => "invalid_credentials",
            Self::AccountNotFound => "account_not_found",
        }
    }

    /// Returns the message shown to the user. Credential failures share one
    /// message so accounts cannot be enumerated.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Please fill all fields",
            Self::InvalidCredentials | Self::AccountNotFound => "Invalid email or password",
        }
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The attempt succeeded.
    Authenticated(UserIdentity),
    /// The attempt was refused.
    Failed(AuthFailure),
}

impl LoginOutcome {
    /// Returns whether the attempt succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the resolved role on success.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated(identity) => Some(identity.role()),
            Self::Failed(_) => None,
        }
    }
}

/// Result of a signup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The account was stored.
    Registered(UserIdentity),
    /// The attempt was refused.
    Rejected(AuthFailure),
}

impl SignupOutcome {
    /// Returns whether the account was stored.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Registered(_))
    }

    /// Returns the registered role on success.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Registered(identity) => Some(identity.role()),
            Self::Rejected(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Decides login and signup outcomes against a [`UserDirectory`].
#[derive(Clone)]
pub struct CredentialResolver {
    user_directory: Arc<dyn UserDirectory>,
    password_hasher: Arc<dyn PasswordHasher>,
    policy: SessionPolicy,
}

impl CredentialResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        user_directory: Arc<dyn UserDirectory>,
        password_hasher: Arc<dyn PasswordHasher>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            user_directory,
            password_hasher,
            policy,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }
}

/// Returns the role the email heuristic assigns to an unknown account.
fn heuristic_role(email: &str) -> Role {
    if email.contains("driver") {
        Role::Driver
    } else {
        Role::User
    }
}
