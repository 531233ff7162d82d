// Repository ports (interfaces implemented by infrastructure adapters)

pub mod listing_repository;
pub mod user_repository;

pub use listing_repository::{ListingCriteria, ListingRepository, StatusUpdate};
pub use user_repository::{User, UserRepository};

use thiserror::Error;

/// Failures reported by a repository adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The backing store could not be reached or failed the statement
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be mapped back into the domain
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
