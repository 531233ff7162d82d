use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::listing::{Listing, ListingId, ListingStatus};
use crate::domain::repositories::{ListingCriteria, ListingRepository, RepositoryError, StatusUpdate};

/// In-process ListingRepository
///
/// Listings are kept in insertion order; every mutation happens under the
/// write lock, which gives the same per-listing atomicity as a single SQL
/// statement.
#[derive(Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), RepositoryError> {
        let mut listings = self.listings.write().await;
        if listings.iter().any(|l| l.id() == listing.id()) {
            return Err(RepositoryError::Duplicate(format!("listing {}", listing.id())));
        }
        listings.push(listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        Ok(self.listings.read().await.iter().find(|l| l.id() == id).cloned())
    }

    async fn increment_views(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        let mut listings = self.listings.write().await;
        Ok(listings.iter_mut().find(|l| l.id() == id).map(|listing| {
            listing.record_view();
            listing.clone()
        }))
    }

    async fn update_status(
        &self,
        id: ListingId,
        seller_id: Uuid,
        status: ListingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RepositoryError> {
        let mut listings = self.listings.write().await;
        let Some(listing) = listings.iter_mut().find(|l| l.id() == id) else {
            return Ok(StatusUpdate::NotFound);
        };
        if !listing.is_owned_by(seller_id) {
            return Ok(StatusUpdate::NotOwner);
        }
        listing.set_status(status, updated_at);
        Ok(StatusUpdate::Updated)
    }

    async fn list(&self, criteria: &ListingCriteria) -> Result<Vec<Listing>, RepositoryError> {
        let listings = self.listings.read().await;
        // Newest insertion first, then a stable sort keeps that as the tie-break
        let mut matching: Vec<Listing> = listings
            .iter()
            .rev()
            .filter(|l| criteria.status.map_or(true, |s| l.status() == s))
            .filter(|l| criteria.seller_id.map_or(true, |id| l.is_owned_by(id)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(matching)
    }
}
