use safacycle_core::{Identity, Role};
use serde::{Deserialize, Serialize};

/// Screen a session is routed to after its identity changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Landing screen for signed-out visitors.
    Welcome,
    /// Administrative dashboard.
    AdminDashboard,
    /// Driver dashboard with assigned collections.
    DriverDashboard,
    /// End-user home screen.
    Home,
}

impl Destination {
    /// Returns the dashboard for a role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Driver => Self::DriverDashboard,
            Role::User => Self::Home,
        }
    }

    /// Returns where the given identity lands.
    #[must_use]
    pub fn for_identity(identity: &Identity) -> Self {
        identity.role().map_or(Self::Welcome, Self::for_role)
    }

    /// Returns the screen name used by the navigation layer.
    #[must_use]
    pub fn screen_name(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::AdminDashboard => "AdminDashboard",
            Self::DriverDashboard => "DriverDashboard",
            Self::Home => "Home",
        }
    }
}
