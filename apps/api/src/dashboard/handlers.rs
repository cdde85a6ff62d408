use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::accounts::{self, store as account_store};
use crate::auth::extractor::CurrentUser;
use crate::dashboard::stats::{self, DashboardStats};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn get_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(stats::dashboard_stats(&state.db, user.id).await?))
}

/// POST /api/dashboard/refresh
/// Refreshes every active account; a failing account is logged and skipped
/// so one dead token cannot block the rest.
pub async fn refresh_all(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    let accounts = account_store::list_active_by_user(&state.db, user.id).await?;

    for account in &accounts {
        if let Err(e) = accounts::refresh_account_stats(&state, account).await {
            warn!(account_id = %account.id, "Account refresh failed: {e}");
        }
    }

    Ok(Json(json!({"message": "Account stats refreshed successfully"})))
}
