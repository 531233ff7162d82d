use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{JwtAuth, MaybeAuth};
use crate::api::state::AppState;
use crate::domain::errors::MarketError;
use crate::domain::listing::{Category, Listing, ListingDraft, ListingId, ListingStatus, Price};
use crate::services::ListingFilter;

/// Listing as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: ListingId,
    pub title: String,
    pub category: Category,
    pub price: Price,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_email: String,
    pub status: ListingStatus,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        let seller = listing.seller();
        Self {
            id: listing.id(),
            title: listing.title().to_string(),
            category: listing.category(),
            price: listing.price(),
            location: listing.location().to_string(),
            description: listing.description().to_string(),
            images: listing.images().to_vec(),
            seller_id: seller.id,
            seller_name: seller.name.clone(),
            seller_email: seller.email.clone(),
            status: listing.status(),
            views: listing.views(),
            created_at: listing.created_at(),
            updated_at: listing.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub listing_id: ListingId,
}

#[derive(Debug, Serialize)]
pub struct ListingEnvelope {
    pub success: bool,
    pub listing: ListingResponse,
}

#[derive(Debug, Serialize)]
pub struct ListingsEnvelope {
    pub success: bool,
    pub listings: Vec<ListingResponse>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Request body for a status change
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Create a listing owned by the caller
///
/// POST /api/listings
pub async fn create_listing(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    payload: Result<Json<ListingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(draft) = payload?;

    let listing_id = state.listings.create(draft, Some(&caller)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            message: "Listing created successfully".to_string(),
            listing_id,
        }),
    ))
}

/// List listings, active only by default
///
/// GET /api/listings?status=&mine=
pub async fn list_listings(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    filter: Result<Query<ListingFilter>, QueryRejection>,
) -> Result<Json<ListingsEnvelope>, ApiError> {
    let Query(filter) = filter?;
    let listings = state.query.list(&filter, caller.as_ref()).await?;

    Ok(Json(ListingsEnvelope {
        success: true,
        listings: listings.iter().map(ListingResponse::from).collect(),
    }))
}

/// Get a listing by ID, counting one view
///
/// GET /api/listings/:id
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ListingEnvelope>, ApiError> {
    let id = ListingId::parse(&id)?;
    let listing = state.listings.get_by_id(id).await?;

    Ok(Json(ListingEnvelope {
        success: true,
        listing: ListingResponse::from(&listing),
    }))
}

/// Change the status of a listing the caller owns
///
/// PATCH /api/listings/:id
pub async fn update_listing_status(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = ListingId::parse(&id)?;
    let next = match payload {
        Ok(Json(UpdateStatusRequest { status: Some(raw) })) => raw.parse::<ListingStatus>()?,
        _ => return Err(MarketError::InvalidStatus.into()),
    };

    state.listings.update_status(id, next, Some(&caller)).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Soft-delete a listing the caller owns
///
/// DELETE /api/listings/:id
pub async fn delete_listing(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = ListingId::parse(&id)?;
    state.listings.soft_delete(id, Some(&caller)).await?;

    Ok(Json(SuccessResponse { success: true }))
}
