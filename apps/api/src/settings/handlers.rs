use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::platform::Platform;
use crate::models::settings::PlatformSettings;
use crate::settings::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettingRequest {
    #[serde(default)]
    pub default_prompt: Option<String>,
}

/// GET /api/platform-settings
pub async fn get_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<PlatformSettings>>, AppError> {
    Ok(Json(store::list_active_by_user(&state.db, user.id).await?))
}

/// GET /api/platform-settings/:platform
pub async fn get_setting(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(platform): Path<Platform>,
) -> Result<Json<PlatformSettings>, AppError> {
    let setting = store::find(&state.db, user.id, platform)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No settings for {platform}")))?;
    Ok(Json(setting))
}

/// POST /api/platform-settings/:platform
pub async fn upsert_setting(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(platform): Path<Platform>,
    Json(req): Json<PlatformSettingRequest>,
) -> Result<Json<PlatformSettings>, AppError> {
    let setting =
        store::upsert(&state.db, user.id, platform, req.default_prompt.as_deref()).await?;
    Ok(Json(setting))
}

/// PUT /api/platform-settings/:platform
pub async fn update_setting(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(platform): Path<Platform>,
    Json(req): Json<PlatformSettingRequest>,
) -> Result<Json<PlatformSettings>, AppError> {
    let setting = store::update_prompt(&state.db, user.id, platform, req.default_prompt.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No settings for {platform}")))?;
    Ok(Json(setting))
}

/// DELETE /api/platform-settings/:platform
pub async fn delete_setting(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(platform): Path<Platform>,
) -> Result<Json<Value>, AppError> {
    store::delete(&state.db, user.id, platform).await?;
    Ok(Json(json!({"message": "Platform setting deleted successfully"})))
}
