use std::env;
use std::path::PathBuf;

use safacycle_application::{PasswordCheck, SeedAccount, SessionPolicy};
use safacycle_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordHasherConfig {
    Plaintext,
    Argon2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDirectoryConfig {
    Memory,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub policy: SessionPolicy,
    pub password_hasher: PasswordHasherConfig,
    pub user_directory: UserDirectoryConfig,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let password_check = match lookup("SAFACYCLE_PASSWORD_CHECK") {
            Some(value) => PasswordCheck::parse(value.trim())?,
            None => PasswordCheck::Legacy,
        };
        let fallback_provisioning =
            parse_bool(&lookup, "SAFACYCLE_FALLBACK_PROVISIONING", true)?;
        let seed_admin = parse_bool(&lookup, "SAFACYCLE_SEED_ADMIN", true)?;

        let password_hasher = match lookup("SAFACYCLE_PASSWORD_HASHER")
            .unwrap_or_else(|| "plaintext".to_owned())
            .trim()
        {
            "plaintext" => PasswordHasherConfig::Plaintext,
            "argon2" => PasswordHasherConfig::Argon2,
            other => {
                return Err(AppError::Validation(format!(
                    "SAFACYCLE_PASSWORD_HASHER must be either 'plaintext' or 'argon2', got '{other}'"
                )));
            }
        };

        let user_directory = match lookup("SAFACYCLE_USER_DIRECTORY")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
        {
            None => UserDirectoryConfig::Memory,
            Some(value) if value == "memory" => UserDirectoryConfig::Memory,
            Some(path) => UserDirectoryConfig::JsonFile(PathBuf::from(path)),
        };

        Ok(Self {
            policy: SessionPolicy {
                password_check,
                fallback_provisioning,
                seed_account: seed_admin.then(SeedAccount::legacy_admin),
            },
            password_hasher,
            user_directory,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> AppResult<bool> {
    match lookup(name) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(AppError::Validation(format!(
                "invalid {name} value '{value}': expected true or false"
            ))),
        },
        None => Ok(default),
    }
}
