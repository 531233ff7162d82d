use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::listing::{Category, Listing, ListingId, ListingStatus, Price, SellerSnapshot};
use crate::domain::repositories::{ListingCriteria, ListingRepository, RepositoryError, StatusUpdate};

const LISTING_COLUMNS: &str = r#"
    id, title, category, price, location, description, images,
    seller_id, seller_name, seller_email, status, views,
    created_at, updated_at
"#;

/// PostgreSQL implementation of ListingRepository
///
/// View counting and status changes are single UPDATE statements, so
/// PostgreSQL row locking provides the per-listing atomicity.
pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    /// Creates a new PostgresListingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    title: String,
    category: Category,
    price: Decimal,
    location: String,
    description: String,
    images: Vec<String>,
    seller_id: Uuid,
    seller_name: String,
    seller_email: String,
    status: ListingStatus,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = RepositoryError;

    fn try_from(r: ListingRow) -> Result<Self, Self::Error> {
        let price = Price::new(r.price).ok_or_else(|| {
            RepositoryError::Corrupt(format!("Non-positive price on listing {}", r.id))
        })?;
        Ok(Listing::from_persistence(
            ListingId::from(r.id),
            r.title,
            r.category,
            price,
            r.location,
            r.description,
            r.images,
            SellerSnapshot {
                id: r.seller_id,
                name: r.seller_name,
                email: r.seller_email,
            },
            r.status,
            r.views,
            r.created_at,
            r.updated_at,
        ))
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), RepositoryError> {
        let seller = listing.seller();
        sqlx::query(
            r#"
            INSERT INTO listings (
                id, title, category, price, location, description, images,
                seller_id, seller_name, seller_email, status, views,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(listing.id().as_uuid())
        .bind(listing.title())
        .bind(listing.category())
        .bind(listing.price().amount())
        .bind(listing.location())
        .bind(listing.description())
        .bind(listing.images().to_vec())
        .bind(seller.id)
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(listing.status())
        .bind(listing.views())
        .bind(listing.created_at())
        .bind(listing.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        let sql = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(Listing::try_from)
            .transpose()
    }

    async fn increment_views(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        let sql = format!(
            "UPDATE listings SET views = views + 1 WHERE id = $1 RETURNING {}",
            LISTING_COLUMNS
        );
        sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(Listing::try_from)
            .transpose()
    }

    async fn update_status(
        &self,
        id: ListingId,
        seller_id: Uuid,
        status: ListingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE listings
            SET status = $3, updated_at = $4
            WHERE id = $1 AND seller_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(seller_id)
        .bind(status)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(StatusUpdate::Updated);
        }

        // Nothing matched: either the listing is missing or someone else owns it
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM listings WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            StatusUpdate::NotOwner
        } else {
            StatusUpdate::NotFound
        })
    }

    async fn list(&self, criteria: &ListingCriteria) -> Result<Vec<Listing>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM listings
            WHERE ($1::listing_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR seller_id = $2)
            ORDER BY created_at DESC, seq DESC
            "#,
            LISTING_COLUMNS
        );
        sqlx::query_as::<_, ListingRow>(&sql)
            .bind(criteria.status)
            .bind(criteria.seller_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Listing::try_from)
            .collect()
    }
}
