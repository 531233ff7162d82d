use serde::Deserialize;

use super::caller::Caller;
use super::listing_store::ListingStore;
use crate::domain::errors::{MarketError, MarketResult};
use crate::domain::listing::{Listing, ListingStatus, StatusFilter};
use crate::domain::repositories::ListingCriteria;

/// Raw collection filter as received from a client
///
/// Both fields are kept as strings so that malformed values surface as
/// `InvalidFilter` rather than a generic decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub status: Option<String>,
    pub mine: Option<String>,
}

impl ListingFilter {
    pub fn status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            mine: None,
        }
    }

    pub fn mine() -> Self {
        Self {
            status: None,
            mine: Some("true".to_string()),
        }
    }
}

/// Translates collection intents into store criteria
///
/// Rules:
/// - no status and not `mine` → active only
/// - `mine` → scoped to the caller, every status unless narrowed
/// - `status=all` → no status constraint
#[derive(Clone)]
pub struct ListingQuery {
    store: ListingStore,
}

impl ListingQuery {
    pub fn new(store: ListingStore) -> Self {
        Self { store }
    }

    /// Validates and normalizes `filter` for `caller`
    ///
    /// # Errors
    /// * `InvalidFilter` - unknown status or non-boolean `mine`
    /// * `Unauthorized` - `mine` requested without a caller
    pub fn normalize(filter: &ListingFilter, caller: Option<&Caller>) -> MarketResult<ListingCriteria> {
        let status = match non_empty(filter.status.as_deref()) {
            Some(raw) => Some(raw.parse::<StatusFilter>()?),
            None => None,
        };
        let mine = parse_mine(filter.mine.as_deref())?;

        if mine {
            let caller = caller.ok_or(MarketError::Unauthorized)?;
            return Ok(ListingCriteria {
                status: status.and_then(|s| s.as_status()),
                seller_id: Some(caller.id),
            });
        }

        Ok(ListingCriteria {
            status: match status {
                Some(filter) => filter.as_status(),
                None => Some(ListingStatus::Active),
            },
            seller_id: None,
        })
    }

    pub async fn list(&self, filter: &ListingFilter, caller: Option<&Caller>) -> MarketResult<Vec<Listing>> {
        let criteria = Self::normalize(filter, caller)?;
        tracing::debug!(?criteria, "Listing query");
        self.store.list(&criteria).await
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_mine(raw: Option<&str>) -> MarketResult<bool> {
    match non_empty(raw) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(MarketError::InvalidFilter(format!(
            "mine must be true or false (got '{}')",
            other
        ))),
    }
}
