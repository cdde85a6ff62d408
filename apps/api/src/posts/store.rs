use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::platform::PostStatus;
use crate::models::post::Post;

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_by_user_and_status(
    pool: &PgPool,
    user_id: Uuid,
    status: PostStatus,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM posts WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(status.as_str())
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    title: Option<&str>,
    references_text: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO posts (user_id, content, title, references_text)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(content)
    .bind(title)
    .bind(references_text)
    .fetch_one(pool)
    .await
}

pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    content: &str,
    title: Option<&str>,
    references_text: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE posts
        SET content = $2, title = $3, references_text = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(content)
    .bind(title)
    .bind(references_text)
    .fetch_one(pool)
    .await
}

pub async fn set_scheduled(
    pool: &PgPool,
    post_id: Uuid,
    scheduled_time: DateTime<Utc>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE posts
        SET status = 'SCHEDULED', scheduled_time = $2, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(scheduled_time)
    .fetch_one(pool)
    .await
}

pub async fn set_published(pool: &PgPool, post_id: Uuid) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE posts
        SET status = 'PUBLISHED', published_at = now(), updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Engagement is the sum of the three counters; kept denormalized so the
/// dashboard aggregate is a single SUM.
pub async fn update_engagement(
    pool: &PgPool,
    post_id: Uuid,
    likes: i64,
    shares: i64,
    comments: i64,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE posts
        SET likes_count = $2, shares_count = $3, comments_count = $4,
            engagement_count = $2 + $3 + $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(likes)
    .bind(shares)
    .bind(comments)
    .fetch_one(pool)
    .await
}

pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn count_by_user_and_status(
    pool: &PgPool,
    user_id: Uuid,
    status: PostStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = $1 AND status = $2")
        .bind(user_id)
        .bind(status.as_str())
        .fetch_one(pool)
        .await
}

/// Engagement sums only count what went live.
pub async fn engagement_totals_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<(i64, i64, i64, i64), sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(engagement_count), 0)::BIGINT,
               COALESCE(SUM(likes_count), 0)::BIGINT,
               COALESCE(SUM(shares_count), 0)::BIGINT,
               COALESCE(SUM(comments_count), 0)::BIGINT
        FROM posts
        WHERE user_id = $1 AND status = 'PUBLISHED'
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// SCHEDULED posts whose time has come, for the publisher sweep.
pub async fn list_due_scheduled(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM posts WHERE status = 'SCHEDULED' AND scheduled_time <= $1 ORDER BY scheduled_time",
    )
    .bind(now)
    .fetch_all(pool)
    .await
}
