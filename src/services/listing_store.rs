use std::sync::Arc;

use chrono::Utc;

use super::caller::Caller;
use crate::domain::errors::{MarketError, MarketResult};
use crate::domain::listing::{Listing, ListingDraft, ListingId, ListingStatus};
use crate::domain::repositories::{ListingCriteria, ListingRepository, StatusUpdate};

/// Listing lifecycle and authorization
///
/// Validation and ownership checks run before anything is written. Status
/// writes are owner-conditional at the store, so a rejected caller can never
/// leave a partial mutation behind.
#[derive(Clone)]
pub struct ListingStore {
    listings: Arc<dyn ListingRepository>,
}

impl ListingStore {
    pub fn new(listings: Arc<dyn ListingRepository>) -> Self {
        Self { listings }
    }

    /// Validates `draft` and persists it as an active listing owned by `caller`
    ///
    /// Duplicate submissions create duplicate listings.
    ///
    /// # Errors
    /// * `Unauthorized` - no caller, or caller without an email
    /// * `ValidationFailed` - every violated field rule
    pub async fn create(&self, draft: ListingDraft, caller: Option<&Caller>) -> MarketResult<ListingId> {
        let caller = require_caller(caller)?;
        if caller.email.trim().is_empty() {
            return Err(MarketError::Unauthorized);
        }

        let valid = draft.validate()?;
        let listing = Listing::new(valid, caller.seller_snapshot());
        self.listings.insert(&listing).await?;

        tracing::info!(listing_id = %listing.id(), seller_id = %caller.id, "Listing created");
        Ok(listing.id())
    }

    /// Fetches a listing, counting the fetch as one view
    ///
    /// The increment is a single atomic store operation, so concurrent
    /// fetches never lose views. The returned listing includes this view.
    pub async fn get_by_id(&self, id: ListingId) -> MarketResult<Listing> {
        self.listings
            .increment_views(id)
            .await?
            .ok_or(MarketError::NotFound)
    }

    /// Sets the status of a listing owned by `caller`
    ///
    /// No transition table is enforced: the owner may move between any of
    /// the three statuses.
    ///
    /// # Errors
    /// * `Unauthorized` - no caller
    /// * `NotFound` - no listing with this id
    /// * `Forbidden` - caller is not the seller
    pub async fn update_status(
        &self,
        id: ListingId,
        next: ListingStatus,
        caller: Option<&Caller>,
    ) -> MarketResult<()> {
        let caller = require_caller(caller)?;

        match self
            .listings
            .update_status(id, caller.id, next, Utc::now())
            .await?
        {
            StatusUpdate::Updated => {
                tracing::info!(listing_id = %id, seller_id = %caller.id, status = %next, "Listing status updated");
                Ok(())
            }
            StatusUpdate::NotFound => Err(MarketError::NotFound),
            StatusUpdate::NotOwner => {
                tracing::warn!(listing_id = %id, caller_id = %caller.id, "Status change by non-owner rejected");
                Err(MarketError::Forbidden)
            }
        }
    }

    /// Soft-deletes a listing; the record stays readable with status `deleted`
    pub async fn soft_delete(&self, id: ListingId, caller: Option<&Caller>) -> MarketResult<()> {
        self.update_status(id, ListingStatus::Deleted, caller).await
    }

    /// Listings matching already-normalized criteria, newest first
    pub async fn list(&self, criteria: &ListingCriteria) -> MarketResult<Vec<Listing>> {
        Ok(self.listings.list(criteria).await?)
    }
}

fn require_caller(caller: Option<&Caller>) -> MarketResult<&Caller> {
    caller.ok_or(MarketError::Unauthorized)
}
