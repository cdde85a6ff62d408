use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::platform::PostStatus;
use crate::models::post::Post;
use crate::models::user::User;
use crate::posts::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePostRequest {
    pub scheduled_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRequest {
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
}

/// GET /api/posts
pub async fn get_posts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(store::list_by_user(&state.db, user.id).await?))
}

/// GET /api/posts/drafts
pub async fn get_drafts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(
        store::list_by_user_and_status(&state.db, user.id, PostStatus::Draft).await?,
    ))
}

/// GET /api/posts/published
pub async fn get_published(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(
        store::list_by_user_and_status(&state.db, user.id, PostStatus::Published).await?,
    ))
}

/// GET /api/posts/:post_id
pub async fn get_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(owned_post(&state, post_id, &user).await?))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<Post>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    let post = store::insert_post(
        &state.db,
        user.id,
        &req.content,
        req.title.as_deref(),
        req.references.as_deref(),
    )
    .await?;

    info!(post_id = %post.id, "Post created");
    Ok(Json(post))
}

/// PUT /api/posts/:post_id
pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    owned_post(&state, post_id, &user).await?;
    let post = store::update_post(
        &state.db,
        post_id,
        &req.content,
        req.title.as_deref(),
        req.references.as_deref(),
    )
    .await?;

    Ok(Json(post))
}

/// POST /api/posts/:post_id/schedule
pub async fn schedule_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<SchedulePostRequest>,
) -> Result<Json<Post>, AppError> {
    owned_post(&state, post_id, &user).await?;
    let post = store::set_scheduled(&state.db, post_id, req.scheduled_time).await?;

    info!(post_id = %post.id, scheduled_time = %req.scheduled_time, "Post scheduled");
    Ok(Json(post))
}

/// POST /api/posts/:post_id/publish
pub async fn publish_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Post>, AppError> {
    owned_post(&state, post_id, &user).await?;
    let post = store::set_published(&state.db, post_id).await?;

    info!(post_id = %post.id, "Post published");
    Ok(Json(post))
}

/// DELETE /api/posts/:post_id
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    owned_post(&state, post_id, &user).await?;
    store::delete_post(&state.db, post_id).await?;

    info!(post_id = %post_id, "Post deleted");
    Ok(Json(json!({"message": "Post deleted successfully"})))
}

/// POST /api/posts/:post_id/engagement
pub async fn update_engagement(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<EngagementRequest>,
) -> Result<Json<Post>, AppError> {
    owned_post(&state, post_id, &user).await?;
    let post =
        store::update_engagement(&state.db, post_id, req.likes, req.shares, req.comments).await?;

    Ok(Json(post))
}

pub(crate) async fn owned_post(
    state: &AppState,
    post_id: Uuid,
    user: &User,
) -> Result<Post, AppError> {
    let post = store::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    if post.user_id != user.id {
        return Err(AppError::Forbidden);
    }

    Ok(post)
}
