// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_listing_repository;
pub mod in_memory_user_repository;
pub mod postgres_listing_repository;
pub mod postgres_user_repository;

pub use in_memory_listing_repository::InMemoryListingRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_listing_repository::PostgresListingRepository;
pub use postgres_user_repository::PostgresUserRepository;

use crate::domain::repositories::RepositoryError;

const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                RepositoryError::Duplicate(db.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                RepositoryError::Corrupt(err.to_string())
            }
            _ => RepositoryError::Unavailable(err.to_string()),
        }
    }
}
