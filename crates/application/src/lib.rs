//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_event_service;
mod credential_resolver;
mod session_store;
mod user_directory;

pub use auth_event_service::{AuthEvent, AuthEventRepository, AuthEventService};
pub use credential_resolver::{
    AuthFailure, CredentialResolver, LoginOutcome, PasswordCheck, SeedAccount, SessionPolicy,
    SignupOutcome,
};
pub use session_store::SessionStore;
pub use user_directory::{PasswordHasher, UserDirectory, UserRecord};
