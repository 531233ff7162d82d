use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::draft::ValidListing;
use super::value_objects::{Category, ListingId, ListingStatus, Price, SellerSnapshot};

/// Listing aggregate root
///
/// An item offered for sale by one employee.
///
/// # Invariants
/// - Price is strictly positive
/// - At least one image at creation
/// - Seller snapshot is set once at creation and never reassigned
/// - `updated_at` is refreshed on every status change
/// - `views` is never negative
///
/// # Example
/// ```
/// use marketplace_api::domain::listing::{Listing, ListingDraft, ListingStatus, SellerSnapshot};
/// use serde_json::json;
/// use uuid::Uuid;
///
/// let valid = ListingDraft {
///     title: Some("Bike".into()),
///     category: Some("Vehicles".into()),
///     price: Some(json!(80)),
///     location: Some("Lobby".into()),
///     description: Some("Commuter bike in good shape".into()),
///     images: Some(vec!["img".into()]),
/// }
/// .validate()
/// .expect("valid draft");
///
/// let seller = SellerSnapshot { id: Uuid::new_v4(), name: "ann".into(), email: "ann@company.com".into() };
/// let listing = Listing::new(valid, seller);
/// assert_eq!(listing.status(), ListingStatus::Active);
/// assert_eq!(listing.views(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    id: ListingId,
    title: String,
    category: Category,
    price: Price,
    location: String,
    description: String,
    images: Vec<String>,
    seller: SellerSnapshot,
    status: ListingStatus,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Listing {
    /// Creates a new active listing owned by `seller`
    pub fn new(valid: ValidListing, seller: SellerSnapshot) -> Self {
        let now = Utc::now();
        Self {
            id: ListingId::new(),
            title: valid.title,
            category: valid.category,
            price: valid.price,
            location: valid.location,
            description: valid.description,
            images: valid.images,
            seller,
            status: ListingStatus::Active,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// True if `user_id` is the seller of this listing
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.seller.id == user_id
    }

    /// Moves the listing to `next` and refreshes `updated_at`
    ///
    /// Any status may follow any other; only ownership gates this.
    pub fn set_status(&mut self, next: ListingStatus, at: DateTime<Utc>) {
        self.status = next;
        self.updated_at = at;
    }

    /// Counts one view
    pub fn record_view(&mut self) {
        self.views += 1;
    }

    // ===== Getters =====

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn seller(&self) -> &SellerSnapshot {
        &self.seller
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn views(&self) -> i64 {
        self.views
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a Listing from persistence layer data
    ///
    /// Bypasses validation; only repository implementations should call this.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: ListingId,
        title: String,
        category: Category,
        price: Price,
        location: String,
        description: String,
        images: Vec<String>,
        seller: SellerSnapshot,
        status: ListingStatus,
        views: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            price,
            location,
            description,
            images,
            seller,
            status,
            views,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::ListingDraft;
    use chrono::Duration;
    use serde_json::json;

    fn seller() -> SellerSnapshot {
        SellerSnapshot {
            id: Uuid::new_v4(),
            name: "dana".to_string(),
            email: "dana@company.com".to_string(),
        }
    }

    fn valid() -> ValidListing {
        ListingDraft {
            title: Some("Bookshelf".to_string()),
            category: Some("Furniture".to_string()),
            price: Some(json!(40)),
            location: Some("Floor 2".to_string()),
            description: Some("Five shelves, solid oak".to_string()),
            images: Some(vec!["a".to_string(), "b".to_string()]),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn new_listing_defaults() {
        let seller = seller();
        let listing = Listing::new(valid(), seller.clone());

        assert_eq!(listing.status(), ListingStatus::Active);
        assert_eq!(listing.views(), 0);
        assert_eq!(listing.seller(), &seller);
        assert_eq!(listing.created_at(), listing.updated_at());
        assert_eq!(listing.images().to_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn ownership_check() {
        let seller = seller();
        let listing = Listing::new(valid(), seller.clone());

        assert!(listing.is_owned_by(seller.id));
        assert!(!listing.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn set_status_refreshes_updated_at() {
        let mut listing = Listing::new(valid(), seller());
        let later = listing.updated_at() + Duration::seconds(5);

        listing.set_status(ListingStatus::Sold, later);

        assert_eq!(listing.status(), ListingStatus::Sold);
        assert_eq!(listing.updated_at(), later);
        assert!(listing.created_at() < listing.updated_at());
    }

    #[test]
    fn any_status_may_follow_any_other() {
        let mut listing = Listing::new(valid(), seller());
        let now = Utc::now();

        listing.set_status(ListingStatus::Deleted, now);
        listing.set_status(ListingStatus::Active, now);

        assert_eq!(listing.status(), ListingStatus::Active);
    }

    #[test]
    fn record_view_counts() {
        let mut listing = Listing::new(valid(), seller());
        listing.record_view();
        listing.record_view();
        assert_eq!(listing.views(), 2);
    }
}
