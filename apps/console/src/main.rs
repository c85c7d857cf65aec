//! SafaCycle session console composition root.

#![forbid(unsafe_code)]

mod console_config;
mod shell;

use std::sync::Arc;

use safacycle_application::{
    AuthEventService, CredentialResolver, PasswordHasher, SessionStore, UserDirectory,
};
use safacycle_core::AppError;
use safacycle_infrastructure::{
    Argon2PasswordHasher, InMemoryUserDirectory, JsonFileUserDirectory, PlaintextPasswordHasher,
    TracingAuthEventRepository,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::console_config::{
    ConsoleConfig, PasswordHasherConfig, UserDirectoryConfig, init_tracing,
};
use crate::shell::{Command, USAGE};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let store = build_session_store(&config).await?;

    info!(
        password_check = ?config.policy.password_check,
        fallback_provisioning = config.policy.fallback_provisioning,
        seed_account = config.policy.seed_account.is_some(),
        "safacycle-console started"
    );

    let mut stdout = tokio::io::stdout();
    write_line(&mut stdout, USAGE).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|error| AppError::Internal(format!("failed to read stdin: {error}")))?
    {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(error) => {
                write_line(&mut stdout, &error.to_string()).await?;
                continue;
            }
        };

        match shell::execute(&store, command).await {
            Ok(output) => write_line(&mut stdout, &output).await?,
            Err(error) => {
                warn!(error = %error, "command failed");
                write_line(&mut stdout, &format!("error: {error}")).await?;
            }
        }
    }

    info!("safacycle-console stopped");
    Ok(())
}

async fn build_session_store(config: &ConsoleConfig) -> Result<SessionStore, AppError> {
    let user_directory: Arc<dyn UserDirectory> = match &config.user_directory {
        UserDirectoryConfig::Memory => Arc::new(InMemoryUserDirectory::new()),
        UserDirectoryConfig::JsonFile(path) => Arc::new(JsonFileUserDirectory::open(path).await?),
    };
    info!(
        directory = ?config.user_directory,
        accounts = user_directory.count().await?,
        "user directory ready"
    );
    let password_hasher: Arc<dyn PasswordHasher> = match config.password_hasher {
        PasswordHasherConfig::Plaintext => Arc::new(PlaintextPasswordHasher),
        PasswordHasherConfig::Argon2 => Arc::new(Argon2PasswordHasher::new()),
    };

    let resolver = CredentialResolver::new(user_directory, password_hasher, config.policy.clone());
    let auth_event_service = AuthEventService::new(Arc::new(TracingAuthEventRepository));

    Ok(SessionStore::new(resolver, auth_event_service))
}

async fn write_line(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), AppError> {
    stdout
        .write_all(format!("{text}\n").as_bytes())
        .await
        .map_err(|error| AppError::Internal(format!("failed to write stdout: {error}")))?;
    stdout
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to write stdout: {error}")))
}
