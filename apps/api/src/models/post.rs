use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A draft, scheduled or published post. `status` holds a
/// [`PostStatus`](crate::models::platform::PostStatus) string.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub content: String,
    /// Source links the author wants to cite. Column is `references_text`
    /// because `references` is reserved in SQL.
    #[serde(rename = "references")]
    pub references_text: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub engagement_count: i64,
    pub likes_count: i64,
    pub shares_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-platform targeting row for a post. `platform` and `publish_status`
/// hold enum strings; `(post_id, platform)` is unique.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostPlatform {
    pub id: Uuid,
    pub post_id: Uuid,
    pub platform: String,
    pub is_enabled: bool,
    pub custom_prompt: Option<String>,
    pub publish_status: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
