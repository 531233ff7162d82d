use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use super::value_objects::{Category, Price};
use crate::domain::errors::MarketError;

const MIN_TITLE_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 10;

/// Unvalidated listing payload as submitted by a seller
///
/// Every field is optional so that a single pass can report all violations.
/// `price` accepts a JSON number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingDraft {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<Value>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Payload that has passed every field rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidListing {
    pub title: String,
    pub category: Category,
    pub price: Price,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
}

impl ListingDraft {
    /// Validates all fields, collecting one message per violated field
    ///
    /// # Returns
    /// * `Ok(ValidListing)` - trimmed, typed payload
    /// * `Err(MarketError::ValidationFailed)` - every violation, in field order
    pub fn validate(self) -> Result<ValidListing, MarketError> {
        let mut errors = Vec::new();

        let title = trimmed(self.title);
        if title.chars().count() < MIN_TITLE_LEN {
            errors.push(format!("Title must be at least {} characters", MIN_TITLE_LEN));
        }

        let raw_category = trimmed(self.category);
        let category = if raw_category.is_empty() {
            errors.push("Category is required".to_string());
            None
        } else {
            let parsed = Category::parse(&raw_category);
            if parsed.is_none() {
                errors.push(format!(
                    "Category must be one of: {}",
                    Category::ALL.map(|c| c.as_str()).join(", ")
                ));
            }
            parsed
        };

        let price = self.price.as_ref().and_then(parse_price).and_then(Price::new);
        if price.is_none() {
            errors.push("Price must be greater than 0".to_string());
        }

        let location = trimmed(self.location);
        if location.is_empty() {
            errors.push("Location is required".to_string());
        }

        let description = trimmed(self.description);
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(format!(
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            ));
        }

        let images = self.images.unwrap_or_default();
        if images.is_empty() {
            errors.push("At least one image is required".to_string());
        }

        match (category, price) {
            (Some(category), Some(price)) if errors.is_empty() => Ok(ValidListing {
                title,
                category,
                price,
                location,
                description,
                images,
            }),
            _ => Err(MarketError::ValidationFailed(errors)),
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
