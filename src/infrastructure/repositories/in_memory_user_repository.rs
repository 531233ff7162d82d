use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, User, UserRepository};
use crate::domain::user::value_objects::Email;

/// In-process UserRepository
///
/// Enforces email uniqueness under a single write lock, matching the unique
/// index of the PostgreSQL schema. Used for tests and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate(format!(
                "email already registered: {}",
                user.email
            )));
        }
        let id = user.id;
        users.push(user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let email = Email::new("a@company.com").unwrap();

        repo.create(User::new("a".into(), email.clone(), None)).await.unwrap();
        let err = repo.create(User::new("b".into(), email, None)).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Duplicate(_)));
        assert_eq!(repo.len().await, 1);
    }
}
