use std::sync::Arc;

use crate::domain::repositories::{ListingRepository, UserRepository};
use crate::domain::user::IdentityGate;
use crate::services::{CredentialStore, ListingQuery, ListingStore};

/// Shared application state handed to every handler
///
/// Holds only the pooled store adapters and immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub listings: ListingStore,
    pub query: ListingQuery,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        listings: Arc<dyn ListingRepository>,
        gate: IdentityGate,
        jwt_secret: impl Into<Arc<str>>,
    ) -> Self {
        let listing_store = ListingStore::new(listings);
        Self {
            credentials: CredentialStore::new(users, gate),
            query: ListingQuery::new(listing_store.clone()),
            listings: listing_store,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Overrides the bcrypt work factor used for new passwords
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.credentials = self.credentials.with_hash_cost(cost);
        self
    }
}
