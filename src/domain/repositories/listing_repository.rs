use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::listing::{Listing, ListingId, ListingStatus};

/// Normalized selection handed to the store by the query layer
///
/// `None` on a field means "do not constrain".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingCriteria {
    pub status: Option<ListingStatus>,
    pub seller_id: Option<Uuid>,
}

/// Outcome of an owner-conditional status write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Updated,
    NotOwner,
    NotFound,
}

/// Repository trait for Listing aggregates
///
/// Implementations must make every method a single atomic operation per
/// listing. In particular `increment_views` must not be a read-modify-write
/// performed by the caller.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing
    async fn insert(&self, listing: &Listing) -> Result<(), RepositoryError>;

    /// Find a listing without side effects
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError>;

    /// Atomically add one to `views` and return the updated listing
    async fn increment_views(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError>;

    /// Set status and `updated_at` only if `seller_id` owns the listing
    async fn update_status(
        &self,
        id: ListingId,
        seller_id: Uuid,
        status: ListingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RepositoryError>;

    /// Listings matching `criteria`, newest first
    ///
    /// Equal `created_at` values are ordered by most recent insertion first.
    async fn list(&self, criteria: &ListingCriteria) -> Result<Vec<Listing>, RepositoryError>;
}
