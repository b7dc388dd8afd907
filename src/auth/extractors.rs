use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::TokenKind;
use crate::{error::ApiError, state::AppState};

/// Extracts and validates the bearer JWT, yielding the user ID.
///
/// Every failure mode answers the same way so clients only ever see
/// 401 `{"error": "Authentication required."}` for anonymous requests.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::AuthRequired)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(ApiError::AuthRequired)?;

        let claims = state.jwt.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::AuthRequired
        })?;

        if claims.kind != TokenKind::Access {
            return Err(ApiError::AuthRequired);
        }

        Ok(AuthUser(claims.sub))
    }
}
