use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::user::value_objects::Email;

/// User data for persistence
///
/// `password_hash` is `None` for accounts provisioned through OAuth.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a fresh user record with store-assigned id and current timestamps
    pub fn new(name: String, email: Email, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for User records
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `Duplicate` when the email is taken
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Find a user by (normalized) email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}
