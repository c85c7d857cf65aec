//! Session state for one running application.
//!
//! The store is created once by the composition root and handed to every
//! consumer; clones share the same session.


use std::sync::Arc;

use safacycle_core::{AppResult, Identity, NonEmptyString, Role, UserIdentity};
use safacycle_domain::Destination;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{AuthEvent, AuthEventService, CredentialResolver, LoginOutcome, SignupOutcome};

/// Holds the current [`Identity`] and mediates every change to it.
#[derive(Clone)]
pub struct SessionStore {
    resolver: CredentialResolver,
    auth_event_service: AuthEventService,
    identity: Arc<RwLock<Identity>>,
}

impl SessionStore {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new(resolver: CredentialResolver, auth_event_service: AuthEventService) -> Self {
        Self {
            resolver,
            auth_event_service,
            identity: Arc::new(RwLock::new(Identity::Anonymous)),
        }
    }

    /// Attempts a login. On success the session switches to the resolved
    /// identity; on failure it is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let outcome = self.resolver.login(email, password).await?;

        let label = match &outcome {
            LoginOutcome::Authenticated(identity) => {
                self.replace_identity(identity.clone()).await;
                "success"
            }
            LoginOutcome::Failed(failure) => failure.as_str(),
        };
        self.record(email, "login_attempt", label).await;

        Ok(outcome)
    }

    /// Registers an account and signs it in. Replaces any active session.
    pub async fn signup(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<SignupOutcome> {
        let outcome = self
            .resolver
            .signup(display_name, email, password, role)
            .await?;

        let label = match &outcome {
            SignupOutcome::Registered(identity) => {
                self.replace_identity(identity.clone()).await;
                "success"
            }
            SignupOutcome::Rejected(failure) => failure.as_str(),
        };
        self.record(email, "signup", label).await;

        Ok(outcome)
    }

    /// Signs out. Calling it while signed out does nothing.
    pub async fn logout(&self) {
        let previous = std::mem::take(&mut *self.identity.write().await);

        if let Identity::Authenticated(user) = previous {
            info!(email = %user.email(), "session ended");
            self.record(user.email(), "logout", "success").await;
        }
    }

    /// Returns the current identity.
    pub async fn current_identity(&self) -> Identity {
        self.identity.read().await.clone()
    }

    /// Returns where the navigation layer should route the current identity.
    pub async fn destination(&self) -> Destination {
        Destination::for_identity(&*self.identity.read().await)
    }

    /// Changes the display name of the signed-in identity. Returns `false`
    /// when nobody is signed in or the name is empty.
    pub async fn set_display_name(&self, display_name: &str) -> bool {
        let Ok(display_name) = NonEmptyString::new(display_name) else {
            return false;
        };

        let mut identity = self.identity.write().await;
        let Identity::Authenticated(user) = std::mem::take(&mut *identity) else {
            return false;
        };
        *identity = Identity::Authenticated(user.with_display_name(display_name));
        true
    }

    async fn replace_identity(&self, next: UserIdentity) {
        let mut identity = self.identity.write().await;
        if let Identity::Authenticated(current) = &*identity
            && current.email() != next.email()
        {
            info!(
                from = %current.email(),
                to = %next.email(),
                "replacing active session"
            );
        }
        info!(email = %next.email(), role = %next.role(), "session started");
        *identity = Identity::Authenticated(next);
    }

    async fn record(&self, email: &str, event_type: &str, outcome: &str) {
        let subject = (!email.is_empty()).then_some(email);
        let event = AuthEvent::now(subject, event_type, outcome);

        if let Err(error) = self.auth_event_service.record_event(event).await {
            warn!(event_type, outcome, error = %error, "failed to record auth event");
        }
    }
}
