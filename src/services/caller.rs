use uuid::Uuid;

use crate::domain::listing::SellerSnapshot;

/// Identity of the authenticated party behind a request
///
/// Produced by the session layer and consumed by every mutating listing
/// operation. Operations take `Option<&Caller>`; `None` means the request
/// carried no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl Caller {
    pub fn new(id: Uuid, email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name,
        }
    }

    /// Display name, falling back to the email local part
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Seller fields to freeze onto a new listing
    pub fn seller_snapshot(&self) -> SellerSnapshot {
        SellerSnapshot {
            id: self.id,
            name: self.display_name(),
            email: self.email.clone(),
        }
    }
}
