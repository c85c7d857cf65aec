use safacycle_application::{LoginOutcome, SessionStore, SignupOutcome};
use safacycle_core::{AppError, AppResult, Identity, Role};
use safacycle_domain::SignupForm;

pub const USAGE: &str = "commands: login <email> <password> | signup <name> <email> <password> <confirm-password> <phone> [driver|user] | logout | whoami | rename <name> | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    Signup(SignupForm),
    Logout,
    WhoAmI,
    Rename(String),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> AppResult<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            ["login", email, password] => Ok(Self::Login {
                email: (*email).to_owned(),
                password: (*password).to_owned(),
            }),
            ["signup", name, email, password, confirm_password, phone_number, rest @ ..]
                if rest.len() <= 1 =>
            {
                let role = match rest.first() {
                    Some(role) => role.parse::<Role>()?,
                    None => Role::User,
                };
                Ok(Self::Signup(SignupForm {
                    name: (*name).to_owned(),
                    email: (*email).to_owned(),
                    password: (*password).to_owned(),
                    confirm_password: (*confirm_password).to_owned(),
                    phone_number: (*phone_number).to_owned(),
                    role,
                }))
            }
            ["logout"] => Ok(Self::Logout),
            ["whoami"] => Ok(Self::WhoAmI),
            ["rename", name @ ..] if !name.is_empty() => Ok(Self::Rename(name.join(" "))),
            ["quit"] | ["exit"] => Ok(Self::Quit),
            _ => Err(AppError::Validation(USAGE.to_owned())),
        }
    }
}

/// Runs one command and returns the text to show.
pub async fn execute(store: &SessionStore, command: Command) -> AppResult<String> {
    let summary = match command {
        Command::Login { email, password } => match store.login(&email, &password).await? {
            LoginOutcome::Authenticated(identity) => format!("signed in as {}", identity.role()),
            LoginOutcome::Failed(failure) => failure.user_message().to_owned(),
        },
        Command::Signup(form) => match form.validate() {
            Err(AppError::Validation(message)) => message,
            Err(error) => return Err(error),
            Ok(()) => match store
                .signup(&form.name, &form.email, &form.password, form.role)
                .await?
            {
                SignupOutcome::Registered(identity) => {
                    format!("registered {} as {}", identity.email(), identity.role())
                }
                SignupOutcome::Rejected(_) => "Signup failed".to_owned(),
            },
        },
        Command::Logout => {
            store.logout().await;
            "signed out".to_owned()
        }
        Command::WhoAmI => describe(&store.current_identity().await),
        Command::Rename(name) => {
            if store.set_display_name(&name).await {
                format!("display name set to {name}")
            } else {
                "nobody is signed in".to_owned()
            }
        }
        Command::Quit => return Ok(String::new()),
    };

    Ok(format!(
        "{summary} -> {}",
        store.destination().await.screen_name()
    ))
}

fn describe(identity: &Identity) -> String {
    match identity.as_user() {
        None => "anonymous".to_owned(),
        Some(user) => format!(
            "{} <{}> ({})",
            user.display_name().unwrap_or("unnamed"),
            user.email(),
            user.role()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use safacycle_application::{AuthEventService, CredentialResolver, SessionPolicy};
    use safacycle_infrastructure::{
        InMemoryAuthEventRepository, InMemoryUserDirectory, PlaintextPasswordHasher,
    };

    use super::*;

    fn store() -> SessionStore {
        let resolver = CredentialResolver::new(
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(PlaintextPasswordHasher),
            SessionPolicy::default(),
        );
        SessionStore::new(
            resolver,
            AuthEventService::new(Arc::new(InMemoryAuthEventRepository::new())),
        )
    }

    async fn run(store: &SessionStore, line: &str) -> AppResult<String> {
        execute(store, Command::parse(line)?).await
    }

    #[test]
    fn signup_role_defaults_to_user() -> AppResult<()> {
        let command = Command::parse("signup Alice alice@x.com pw1234 pw1234 0712345678")?;
        assert!(matches!(
            command,
            Command::Signup(SignupForm {
                role: Role::User,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(Command::parse("teleport home").is_err());
        assert!(Command::parse("login only-email").is_err());
        assert!(Command::parse("signup a b c c 0712345678 superuser").is_err());
    }

    #[tokio::test]
    async fn session_flow_routes_by_role() -> AppResult<()> {
        let store = store();

        assert_eq!(
            run(&store, "login admin123@gmail.com Admin123").await?,
            "signed in as admin -> AdminDashboard"
        );
        assert_eq!(
            run(
                &store,
                "signup Alice alice@x.com pw1234 pw1234 0712345678 driver"
            )
            .await?,
            "registered alice@x.com as driver -> DriverDashboard"
        );
        assert_eq!(
            run(&store, "rename Alice Driver").await?,
            "display name set to Alice Driver -> DriverDashboard"
        );
        assert_eq!(
            run(&store, "whoami").await?,
            "Alice Driver <alice@x.com> (driver) -> DriverDashboard"
        );
        assert_eq!(run(&store, "logout").await?, "signed out -> Welcome");
        assert_eq!(run(&store, "whoami").await?, "anonymous -> Welcome");
        Ok(())
    }

    #[tokio::test]
    async fn signup_form_rules_run_before_registration() -> AppResult<()> {
        let store = store();

        assert_eq!(
            run(&store, "signup Bob bob@mail.com pw1234 pw9999 0712345678").await?,
            "Passwords do not match -> Welcome"
        );
        assert_eq!(
            run(&store, "signup Bob bob@mail.com pw1 pw1 0712345678").await?,
            "Password must be at least 6 characters long -> Welcome"
        );
        assert_eq!(
            run(&store, "signup Bob bob@mail.com pw1234 pw1234 0712").await?,
            "Please enter a valid phone number -> Welcome"
        );
        assert!(!store.current_identity().await.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_shows_generic_message() -> AppResult<()> {
        let store = store();

        assert_eq!(
            run(&store, "login admin123@gmail.com wrong").await?,
            "Invalid email or password -> Welcome"
        );
        Ok(())
    }
}
