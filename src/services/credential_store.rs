use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, DEFAULT_COST};
use crate::domain::errors::{MarketError, MarketResult};
use crate::domain::repositories::{RepositoryError, User, UserRepository};
use crate::domain::user::{Email, IdentityGate};

const MIN_PASSWORD_LEN: usize = 8;

/// Identity returned by a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
        }
    }
}

/// Persists user identities and resolves sign-ins
///
/// Every entry point consults the identity gate first; a disallowed domain
/// never reaches the store.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    gate: IdentityGate,
    hash_cost: u32,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>, gate: IdentityGate) -> Self {
        Self {
            users,
            gate,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt work factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Registers a password account
    ///
    /// # Errors
    /// * `InvalidInput` - email or password missing
    /// * `DomainRejected` - email outside the allowed domain
    /// * `WeakPassword` - password shorter than 8 characters
    /// * `Conflict` - email already registered
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> MarketResult<Uuid> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(MarketError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        if !self.gate.is_allowed_email(email) {
            tracing::warn!(domain = %self.gate.allowed_domain(), "Signup rejected for disallowed domain");
            return Err(MarketError::DomainRejected(
                self.gate.allowed_domain().to_string(),
            ));
        }

        let email = Email::new(email).map_err(MarketError::InvalidInput)?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(MarketError::WeakPassword);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(MarketError::Conflict);
        }

        let password_hash =
            hash_password(password, self.hash_cost).map_err(MarketError::Internal)?;
        let name = display_name(name, &email);

        let user_id = self
            .users
            .create(User::new(name, email, Some(password_hash)))
            .await?;

        tracing::info!(%user_id, "User signed up");
        Ok(user_id)
    }

    /// Resolves an email + password pair
    ///
    /// Fails closed: a disallowed domain, unknown user, OAuth-only account or
    /// wrong password all yield `Ok(None)`. Only store failures are errors.
    pub async fn login(&self, email: &str, password: &str) -> MarketResult<Option<AuthenticatedUser>> {
        if email.trim().is_empty() || password.is_empty() {
            return Ok(None);
        }
        if !self.gate.is_allowed_email(email) {
            return Ok(None);
        }
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(None);
        };
        let Some(hash) = user.password_hash.as_deref() else {
            return Ok(None);
        };

        match verify_password(password, hash) {
            Ok(true) => Ok(Some(AuthenticatedUser::from(&user))),
            Ok(false) => Ok(None),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Ok(None)
            }
        }
    }

    /// Finds or provisions the account behind an OAuth sign-in
    ///
    /// # Errors
    /// * `DomainRejected` - no session may be issued for this email
    pub async fn upsert_oauth_user(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> MarketResult<AuthenticatedUser> {
        if !self.gate.is_allowed_email(email) {
            tracing::warn!(domain = %self.gate.allowed_domain(), "OAuth sign-in rejected for disallowed domain");
            return Err(MarketError::DomainRejected(
                self.gate.allowed_domain().to_string(),
            ));
        }
        let email = Email::new(email).map_err(MarketError::InvalidInput)?;

        if let Some(existing) = self.users.find_by_email(&email).await? {
            return Ok(AuthenticatedUser::from(&existing));
        }

        let user = User::new(display_name(name.unwrap_or_default(), &email), email, None);
        match self.users.create(user.clone()).await {
            Ok(user_id) => {
                tracing::info!(%user_id, "Provisioned OAuth user");
                Ok(AuthenticatedUser::from(&user))
            }
            // Lost a race with a concurrent first sign-in for the same email
            Err(RepositoryError::Duplicate(_)) => self
                .users
                .find_by_email(&user.email)
                .await?
                .map(|existing| AuthenticatedUser::from(&existing))
                .ok_or_else(|| {
                    MarketError::StoreUnavailable("user vanished after duplicate insert".to_string())
                }),
            Err(e) => Err(e.into()),
        }
    }
}

fn display_name(name: &str, email: &Email) -> String {
    let name = name.trim();
    if name.is_empty() {
        email.local_part().to_string()
    } else {
        name.to_string()
    }
}
