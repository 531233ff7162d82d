use std::str::FromStr;

use super::value_objects::ListingStatus;
use crate::domain::errors::MarketError;

/// Status selector accepted by listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Only(ListingStatus),
    All,
}

impl StatusFilter {
    /// `None` for `All`, otherwise the single status to match
    pub fn as_status(&self) -> Option<ListingStatus> {
        match self {
            StatusFilter::Only(status) => Some(*status),
            StatusFilter::All => None,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<ListingStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| {
                MarketError::InvalidFilter(format!(
                    "status must be one of active, sold, deleted, all (got '{}')",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(StatusFilter::All.as_status(), None);
    }

    #[test]
    fn parses_each_status() {
        for status in ListingStatus::ALL {
            let filter: StatusFilter = status.as_str().parse().unwrap();
            assert_eq!(filter.as_status(), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_invalid_filter() {
        let err = "pending".parse::<StatusFilter>().unwrap_err();
        assert_eq!(err.code(), "invalid_filter");
    }
}
