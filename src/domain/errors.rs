use thiserror::Error;

use crate::domain::repositories::RepositoryError;

/// Errors reported by the credential and listing stores
///
/// Every rejected operation maps to exactly one variant so callers can tell
/// the failure kinds apart. Validation and authorization variants are always
/// produced before any mutation reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Only @{0} email addresses are allowed")]
    DomainRejected(String),

    #[error("Password must be at least 8 characters")]
    WeakPassword,

    #[error("User already exists")]
    Conflict,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Only the seller can modify this listing")]
    Forbidden,

    #[error("Invalid listing ID")]
    InvalidId,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Listing not found")]
    NotFound,

    #[error("Validation failed")]
    ValidationFailed(Vec<String>),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::InvalidInput(_) => "invalid_input",
            MarketError::DomainRejected(_) => "domain_rejected",
            MarketError::WeakPassword => "weak_password",
            MarketError::Conflict => "conflict",
            MarketError::Unauthorized => "unauthorized",
            MarketError::Forbidden => "forbidden",
            MarketError::InvalidId => "invalid_id",
            MarketError::InvalidStatus => "invalid_status",
            MarketError::InvalidFilter(_) => "invalid_filter",
            MarketError::NotFound => "not_found",
            MarketError::ValidationFailed(_) => "validation_failed",
            MarketError::StoreUnavailable(_) => "store_unavailable",
            MarketError::Internal(_) => "internal",
        }
    }
}

impl From<RepositoryError> for MarketError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(_) => MarketError::Conflict,
            RepositoryError::Unavailable(msg) => MarketError::StoreUnavailable(msg),
            RepositoryError::Corrupt(msg) => MarketError::Internal(msg),
        }
    }
}

pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_conflict() {
        let err: MarketError = RepositoryError::Duplicate("users_email_key".into()).into();
        assert_eq!(err, MarketError::Conflict);
    }

    #[test]
    fn corrupt_row_is_internal_not_retryable() {
        let err: MarketError = RepositoryError::Corrupt("unknown status 'sold'".into()).into();
        assert_eq!(err, MarketError::Internal("unknown status 'sold'".into()));
    }

    #[test]
    fn unavailable_maps_to_store_unavailable() {
        let err: MarketError = RepositoryError::Unavailable("connection refused".into()).into();
        assert_eq!(err.code(), "store_unavailable");
    }

    #[test]
    fn domain_rejected_message_names_domain() {
        let err = MarketError::DomainRejected("company.com".into());
        assert_eq!(err.to_string(), "Only @company.com email addresses are allowed");
    }
}
