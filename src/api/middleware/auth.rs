use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;
use crate::services::Caller;

/// JWT authentication extractor for protected routes
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(caller): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", caller.id))
/// }
/// ```
pub struct JwtAuth(pub Caller);

/// Optional authentication for public routes
///
/// `None` when no Authorization header is present or its token cannot be
/// verified. Routes that need a caller reject the anonymous case themselves.
pub struct MaybeAuth(pub Option<Caller>);

fn caller_from_parts(parts: &Parts, secret: &str) -> Result<Option<Caller>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_header = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid authorization header"))?;

    // Extract bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>"))?;

    let claims = verify_token(token, secret)
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

    Ok(Some(Caller::new(claims.sub, claims.email, Some(claims.name))))
}

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        caller_from_parts(parts, &app.jwt_secret)?
            .map(JwtAuth)
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        match caller_from_parts(parts, &app.jwt_secret) {
            Ok(caller) => Ok(MaybeAuth(caller)),
            Err(err) => {
                tracing::debug!(reason = %err.message, "Ignoring unverifiable session on public route");
                Ok(MaybeAuth(None))
            }
        }
    }
}
