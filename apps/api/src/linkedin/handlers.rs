use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::accounts::{self, store as account_store, NewAccount};
use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::platform::Platform;
use crate::models::user::User;
use crate::state::AppState;

/// GET /api/oauth/linkedin/authorize
pub async fn authorize(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Json<Value> {
    Json(json!({
        "authorizationUrl": state.linkedin.authorization_url()
    }))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Every callback outcome is a 302 back to the frontend dashboard; failures
/// are carried in the `linkedin_error` query parameter.
enum CallbackFailure {
    TokenExchange,
    ProfileFetch,
    AlreadyConnected,
    Internal,
}

impl CallbackFailure {
    fn as_query_value(&self) -> &'static str {
        match self {
            CallbackFailure::TokenExchange => "token_exchange_failed",
            CallbackFailure::ProfileFetch => "profile_fetch_failed",
            CallbackFailure::AlreadyConnected => "already_connected",
            CallbackFailure::Internal => "callback_error",
        }
    }
}

/// GET /api/oauth/linkedin/callback
pub async fn callback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<CallbackParams>,
) -> Response {
    // The authorize URL carries no state parameter, but LinkedIn may echo
    // one back; it is logged for traceability only.
    if let Some(oauth_state) = params.state.as_deref() {
        debug!("LinkedIn callback state parameter: {oauth_state}");
    }

    if let Some(error) = params.error.as_deref() {
        error!("LinkedIn OAuth error: {error}");
        return dashboard_redirect(
            &state.config.frontend_url,
            &format!("linkedin_error={}", urlencoding::encode(error)),
        );
    }

    let Some(code) = params.code.as_deref() else {
        return dashboard_redirect(&state.config.frontend_url, "linkedin_error=no_code");
    };

    match connect_linkedin_account(&state, &user, code).await {
        Ok(account_id) => {
            info!(account_id = %account_id, user_id = %user.id, "LinkedIn account connected");
            dashboard_redirect(&state.config.frontend_url, "linkedin_success=true")
        }
        Err(failure) => dashboard_redirect(
            &state.config.frontend_url,
            &format!("linkedin_error={}", failure.as_query_value()),
        ),
    }
}

/// Token exchange -> profile fetch -> stats fetch -> persist. The stats
/// fetch is best-effort; everything before it aborts the flow.
async fn connect_linkedin_account(
    state: &AppState,
    user: &User,
    code: &str,
) -> Result<Uuid, CallbackFailure> {
    let token = state.linkedin.exchange_code(code).await.map_err(|e| {
        error!("Error exchanging authorization code: {e}");
        CallbackFailure::TokenExchange
    })?;

    let profile = state
        .linkedin
        .fetch_profile(&token.access_token)
        .await
        .map_err(|e| {
            error!("Error fetching user profile: {e}");
            CallbackFailure::ProfileFetch
        })?;

    let stats = state
        .linkedin
        .fetch_stats(&token.access_token)
        .await
        .unwrap_or_else(|e| {
            warn!("Error fetching user stats, continuing without: {e}");
            Default::default()
        });

    let account_name = profile.full_name();
    let member_id = profile.id.clone().unwrap_or_default();
    let account_username = stats.email.clone().unwrap_or(member_id);

    let account = accounts::add_account(
        &state.db,
        user.id,
        NewAccount {
            platform: Platform::Linkedin,
            account_name: &account_name,
            account_username: Some(&account_username),
            access_token: Some(&token.access_token),
            refresh_token: token.refresh_token.as_deref(),
        },
    )
    .await
    .map_err(|e| match e {
        AppError::Conflict(_) => CallbackFailure::AlreadyConnected,
        other => {
            error!("Error persisting LinkedIn account: {other}");
            CallbackFailure::Internal
        }
    })?;

    if let Some(image_url) = profile.profile_image_url() {
        if let Err(e) = account_store::set_profile_image(&state.db, account.id, image_url).await {
            warn!(account_id = %account.id, "Failed to store profile image: {e}");
        }
    }

    if let Err(e) = account_store::update_stats(
        &state.db,
        account.id,
        stats.followers_count(),
        stats.effective_connections_count(),
        0,
    )
    .await
    {
        warn!(account_id = %account.id, "Failed to store account stats: {e}");
    }

    Ok(account.id)
}

/// POST /api/oauth/linkedin/refresh/:account_id
/// Rotates a stale access token through the refresh grant when possible,
/// then re-pulls account stats.
pub async fn refresh(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let mut account = account_store::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))?;

    if account.user_id != user.id {
        return Err(AppError::Forbidden);
    }

    if let (Some(access_token), Some(refresh_token)) = (
        account.access_token.as_deref(),
        account.refresh_token.as_deref(),
    ) {
        if !state.linkedin.validate_token(access_token).await {
            let token = state
                .linkedin
                .refresh_token(refresh_token)
                .await
                .map_err(|e| AppError::OAuth(format!("Token refresh failed: {e}")))?;

            account_store::update_tokens(
                &state.db,
                account.id,
                &token.access_token,
                token.refresh_token.as_deref(),
            )
            .await?;

            info!(account_id = %account.id, "LinkedIn access token rotated");
            account.access_token = Some(token.access_token);
        }
    }

    accounts::refresh_account_stats(&state, &account).await?;

    Ok(Json(json!({
        "message": "LinkedIn account refreshed successfully"
    })))
}

fn dashboard_redirect(frontend_url: &str, query: &str) -> Response {
    let location = format!("{frontend_url}/dashboard?{query}");
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
