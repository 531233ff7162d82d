use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::MarketError;

/// Opaque listing identifier
///
/// Parsing is purely syntactic; a well-formed id may still not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rejects anything that is not a well-formed id with `InvalidId`
    pub fn parse(raw: &str) -> Result<Self, MarketError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| MarketError::InvalidId)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ListingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a listing
///
/// There is no transition table: the owner may move a listing between any
/// two statuses. "Deleting" is the move to `Deleted`; records are never
/// physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Visible in the public feed
    Active,
    /// Sold by the seller, kept for history
    Sold,
    /// Soft-deleted
    Deleted,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 3] = [
        ListingStatus::Active,
        ListingStatus::Sold,
        ListingStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Deleted => "deleted",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ListingStatus::Active),
            "sold" => Ok(ListingStatus::Sold),
            "deleted" => Ok(ListingStatus::Deleted),
            _ => Err(MarketError::InvalidStatus),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of listing categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_category", rename_all = "PascalCase")]
pub enum Category {
    Electronics,
    Furniture,
    Vehicles,
    Books,
    Jewelry,
    Misc,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Furniture,
        Category::Vehicles,
        Category::Books,
        Category::Jewelry,
        Category::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Vehicles => "Vehicles",
            Category::Books => "Books",
            Category::Jewelry => "Jewelry",
            Category::Misc => "Misc",
        }
    }

    /// Exact, case-sensitive match on the display name
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strictly positive asking price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO).then_some(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// Seller fields copied onto the listing at creation time
///
/// This is a snapshot, not a live reference: later changes to the user
/// record are not reflected here, and nothing rewrites it after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
