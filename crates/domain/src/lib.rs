//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod routing;
mod user;

pub use routing::Destination;
pub use user::SignupForm;
