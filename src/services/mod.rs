// Application services
// Own validation and authorization; the only callers of repository ports

pub mod caller;
pub mod credential_store;
pub mod listing_query;
pub mod listing_store;

pub use caller::Caller;
pub use credential_store::{AuthenticatedUser, CredentialStore};
pub use listing_query::{ListingFilter, ListingQuery};
pub use listing_store::ListingStore;
