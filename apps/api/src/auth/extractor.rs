use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::auth::{jwt, store};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Extractor for authenticated requests.
///
/// Decodes the `Authorization: Bearer` JWT and loads the user row it names.
/// Handlers take `CurrentUser` as an argument; a missing or invalid token
/// rejects the request with 401 before the handler body runs.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret).map_err(|e| {
            tracing::debug!("JWT validation failed: {e}");
            AppError::Unauthorized
        })?;

        let user = store::find_by_username(&state.db, &claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}
