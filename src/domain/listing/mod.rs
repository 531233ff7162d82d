// Listing domain module
// Listing aggregate, its value objects, payload validation and query filters

#![allow(clippy::module_inception)]

pub mod draft;
pub mod filter;
pub mod listing;
pub mod value_objects;

pub use draft::{ListingDraft, ValidListing};
pub use filter::StatusFilter;
pub use listing::Listing;
pub use value_objects::{Category, ListingId, ListingStatus, Price, SellerSnapshot};
