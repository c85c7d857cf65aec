//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_auth_event_repository;
mod in_memory_user_directory;
mod json_file_user_directory;
mod plaintext_password_hasher;
mod tracing_auth_event_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_auth_event_repository::InMemoryAuthEventRepository;
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use json_file_user_directory::JsonFileUserDirectory;
pub use plaintext_password_hasher::PlaintextPasswordHasher;
pub use tracing_auth_event_repository::TracingAuthEventRepository;
