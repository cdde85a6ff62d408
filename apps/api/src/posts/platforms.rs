//! Per-post platform targeting: which networks a post goes out to, with an
//! optional per-platform prompt and schedule.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::platform::{Platform, PublishStatus};
use crate::models::post::PostPlatform;
use crate::posts::handlers::owned_post;
use crate::state::AppState;

pub async fn list_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<PostPlatform>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM post_platforms WHERE post_id = $1 ORDER BY platform")
        .bind(post_id)
        .fetch_all(pool)
        .await
}

pub async fn list_enabled_for_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<PostPlatform>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM post_platforms WHERE post_id = $1 AND is_enabled ORDER BY platform",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Create-or-update: re-enabling an existing row keeps its publish history.
pub async fn upsert(
    pool: &PgPool,
    post_id: Uuid,
    platform: Platform,
    custom_prompt: Option<&str>,
) -> Result<PostPlatform, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO post_platforms (post_id, platform, custom_prompt)
        VALUES ($1, $2, $3)
        ON CONFLICT (post_id, platform)
        DO UPDATE SET custom_prompt = $3, is_enabled = TRUE, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(platform.as_str())
    .bind(custom_prompt)
    .fetch_one(pool)
    .await
}

pub async fn set_enabled(
    pool: &PgPool,
    post_id: Uuid,
    platform: Platform,
    enabled: bool,
) -> Result<Option<PostPlatform>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE post_platforms
        SET is_enabled = $3, updated_at = now()
        WHERE post_id = $1 AND platform = $2
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(platform.as_str())
    .bind(enabled)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, post_id: Uuid, platform: Platform) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_platforms WHERE post_id = $1 AND platform = $2")
        .bind(post_id)
        .bind(platform.as_str())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_schedule(
    pool: &PgPool,
    post_id: Uuid,
    platform: Platform,
    scheduled_time: DateTime<Utc>,
) -> Result<Option<PostPlatform>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE post_platforms
        SET scheduled_time = $3, updated_at = now()
        WHERE post_id = $1 AND platform = $2
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(platform.as_str())
    .bind(scheduled_time)
    .fetch_optional(pool)
    .await
}

/// Marks every enabled, still-pending platform row of a post as published.
/// Called when the post itself goes live.
pub async fn mark_published_for_post(pool: &PgPool, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE post_platforms
        SET publish_status = $2, published_at = now(), updated_at = now()
        WHERE post_id = $1 AND is_enabled AND publish_status = $3
        "#,
    )
    .bind(post_id)
    .bind(PublishStatus::Published.as_str())
    .bind(PublishStatus::Pending.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTargetRequest {
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlatformListParams {
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformScheduleRequest {
    pub scheduled_time: DateTime<Utc>,
}

/// GET /api/posts/:post_id/platforms[?enabled=true]
pub async fn get_platforms(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
    Query(params): Query<PlatformListParams>,
) -> Result<Json<Vec<PostPlatform>>, AppError> {
    owned_post(&state, post_id, &user).await?;

    let targets = if params.enabled == Some(true) {
        list_enabled_for_post(&state.db, post_id).await?
    } else {
        list_for_post(&state.db, post_id).await?
    };

    Ok(Json(targets))
}

/// PUT /api/posts/:post_id/platforms/:platform
pub async fn put_platform(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, platform)): Path<(Uuid, Platform)>,
    Json(req): Json<PlatformTargetRequest>,
) -> Result<Json<PostPlatform>, AppError> {
    owned_post(&state, post_id, &user).await?;
    let target = upsert(&state.db, post_id, platform, req.custom_prompt.as_deref()).await?;
    Ok(Json(target))
}

/// POST /api/posts/:post_id/platforms/:platform/enable
pub async fn enable_platform(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, platform)): Path<(Uuid, Platform)>,
) -> Result<Json<PostPlatform>, AppError> {
    owned_post(&state, post_id, &user).await?;

    let target = match set_enabled(&state.db, post_id, platform, true).await? {
        Some(target) => target,
        // First enable for this platform creates the row.
        None => upsert(&state.db, post_id, platform, None).await?,
    };

    Ok(Json(target))
}

/// POST /api/posts/:post_id/platforms/:platform/disable
pub async fn disable_platform(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, platform)): Path<(Uuid, Platform)>,
) -> Result<Json<Value>, AppError> {
    owned_post(&state, post_id, &user).await?;
    set_enabled(&state.db, post_id, platform, false).await?;
    Ok(Json(json!({"message": "Platform disabled"})))
}

/// DELETE /api/posts/:post_id/platforms/:platform
pub async fn delete_platform(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, platform)): Path<(Uuid, Platform)>,
) -> Result<Json<Value>, AppError> {
    owned_post(&state, post_id, &user).await?;
    delete(&state.db, post_id, platform).await?;
    Ok(Json(json!({"message": "Platform removed"})))
}

/// POST /api/posts/:post_id/platforms/:platform/schedule
pub async fn schedule_platform(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((post_id, platform)): Path<(Uuid, Platform)>,
    Json(req): Json<PlatformScheduleRequest>,
) -> Result<Json<PostPlatform>, AppError> {
    owned_post(&state, post_id, &user).await?;

    let target = set_schedule(&state.db, post_id, platform, req.scheduled_time)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Post platform configuration not found".to_string())
        })?;

    Ok(Json(target))
}
