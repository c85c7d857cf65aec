use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AppError, NonEmptyString};

/// Role attached to every authenticated principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operations staff with access to the admin dashboard.
    Admin,
    /// Collection vehicle driver.
    Driver,
    /// Household or business end-user.
    #[default]
    User,
}

impl Role {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Driver => "driver",
            Self::User => "user",
        }
    }

    /// Returns whether an account may request this role at signup.
    #[must_use]
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Driver | Self::User)
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "driver" => Ok(Self::Driver),
            "user" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// The authenticated principal held by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    email: NonEmptyString,
    display_name: Option<String>,
    role: Role,
}

impl UserIdentity {
    /// Creates an identity. Empty display names are stored as absent.
    #[must_use]
    pub fn new(email: NonEmptyString, display_name: Option<String>, role: Role) -> Self {
        Self {
            email,
            display_name: display_name.filter(|name| !name.is_empty()),
            role,
        }
    }

    /// Returns the email the identity authenticated with.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the display name, if one was recorded.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the role of the identity.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns a copy of the identity carrying a different display name.
    #[must_use]
    pub fn with_display_name(self, display_name: NonEmptyString) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..self
        }
    }
}

/// Current principal of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Identity {
    /// No one is signed in.
    #[default]
    Anonymous,
    /// A principal is signed in.
    Authenticated(UserIdentity),
}

impl Identity {
    /// Returns the signed-in principal, if any.
    #[must_use]
    pub fn as_user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Returns the role of the signed-in principal, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.as_user().map(UserIdentity::role)
    }

    /// Returns whether a principal is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> NonEmptyString {
        NonEmptyString::new(value).unwrap_or_else(|_| panic!("test"))
    }

    #[test]
    fn role_round_trips_transport_values() {
        for role in [Role::Admin, Role::Driver, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("Driver".parse::<Role>().is_err());
    }

    #[test]
    fn admin_is_not_self_assignable() {
        assert!(!Role::Admin.is_self_assignable());
        assert!(Role::Driver.is_self_assignable());
    }

    #[test]
    fn empty_display_name_is_stored_as_absent() {
        let identity = UserIdentity::new(email("e@x.com"), Some(String::new()), Role::User);
        assert_eq!(identity.display_name(), None);
    }

    #[test]
    fn anonymous_identity_has_no_user() {
        let identity = Identity::default();
        assert!(identity.as_user().is_none());
        assert!(identity.role().is_none());
    }
}
