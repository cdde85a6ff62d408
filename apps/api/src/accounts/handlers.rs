use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::accounts::{self, store, NewAccount};
use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::account::SocialMediaAccount;
use crate::models::platform::Platform;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectAccountRequest {
    pub platform: Platform,
    pub account_name: String,
    #[serde(default)]
    pub account_username: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// GET /api/social-media/accounts
pub async fn get_accounts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<SocialMediaAccount>>, AppError> {
    let accounts = store::list_active_by_user(&state.db, user.id).await?;
    Ok(Json(accounts))
}

/// POST /api/social-media/connect
pub async fn connect_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ConnectAccountRequest>,
) -> Result<Json<SocialMediaAccount>, AppError> {
    if req.account_name.trim().is_empty() {
        return Err(AppError::Validation("Account name is required".to_string()));
    }

    let account = accounts::add_account(
        &state.db,
        user.id,
        NewAccount {
            platform: req.platform,
            account_name: req.account_name.trim(),
            account_username: req.account_username.as_deref(),
            access_token: req.access_token.as_deref(),
            refresh_token: req.refresh_token.as_deref(),
        },
    )
    .await?;

    info!(account_id = %account.id, platform = %account.platform, "Account connected");
    Ok(Json(account))
}

/// DELETE /api/social-media/accounts/:account_id
pub async fn disconnect_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let account = owned_account(&state, account_id, &user).await?;
    store::deactivate(&state.db, account.id).await?;

    info!(account_id = %account.id, "Account disconnected");
    Ok(Json(json!({"message": "Account disconnected successfully"})))
}

/// POST /api/social-media/accounts/:account_id/refresh
pub async fn refresh_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let account = owned_account(&state, account_id, &user).await?;
    accounts::refresh_account_stats(&state, &account).await?;

    Ok(Json(json!({"message": "Account stats refreshed successfully"})))
}

async fn owned_account(
    state: &AppState,
    account_id: Uuid,
    user: &User,
) -> Result<SocialMediaAccount, AppError> {
    let account = store::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))?;

    if account.user_id != user.id {
        return Err(AppError::Forbidden);
    }

    Ok(account)
}
