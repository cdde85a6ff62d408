use sqlx::PgPool;
use uuid::Uuid;

use crate::models::account::SocialMediaAccount;

pub async fn list_active_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<SocialMediaAccount>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM social_media_accounts WHERE user_id = $1 AND is_active ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<SocialMediaAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM social_media_accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await
}

/// Duplicate check for (user, platform, username). `IS NOT DISTINCT FROM`
/// treats two NULL usernames as the same account.
pub async fn exists_for_user(
    pool: &PgPool,
    user_id: Uuid,
    platform: &str,
    account_username: Option<&str>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM social_media_accounts
            WHERE user_id = $1 AND platform = $2
              AND account_username IS NOT DISTINCT FROM $3
        )
        "#,
    )
    .bind(user_id)
    .bind(platform)
    .bind(account_username)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_account(
    pool: &PgPool,
    user_id: Uuid,
    platform: &str,
    account_name: &str,
    account_username: Option<&str>,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> Result<SocialMediaAccount, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO social_media_accounts
            (user_id, platform, account_name, account_username, access_token, refresh_token)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(platform)
    .bind(account_name)
    .bind(account_username)
    .bind(access_token)
    .bind(refresh_token)
    .fetch_one(pool)
    .await
}

pub async fn update_stats(
    pool: &PgPool,
    account_id: Uuid,
    followers: i64,
    following: i64,
    posts: i64,
) -> Result<SocialMediaAccount, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE social_media_accounts
        SET followers_count = $2, following_count = $3, posts_count = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(followers)
    .bind(following)
    .bind(posts)
    .fetch_one(pool)
    .await
}

pub async fn set_profile_image(
    pool: &PgPool,
    account_id: Uuid,
    profile_image_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE social_media_accounts SET profile_image_url = $2, updated_at = now() WHERE id = $1",
    )
    .bind(account_id)
    .bind(profile_image_url)
    .execute(pool)
    .await?;
    Ok(())
}

/// Soft disconnect; the row (and its tokens) stays for a later reconnect.
pub async fn deactivate(pool: &PgPool, account_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE social_media_accounts SET is_active = FALSE, updated_at = now() WHERE id = $1",
    )
    .bind(account_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Bumps `updated_at` for platforms whose live stat APIs are stubbed.
pub async fn touch(pool: &PgPool, account_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE social_media_accounts SET updated_at = now() WHERE id = $1")
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn total_followers_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(followers_count), 0)::BIGINT FROM social_media_accounts WHERE user_id = $1 AND is_active",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn total_following_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(following_count), 0)::BIGINT FROM social_media_accounts WHERE user_id = $1 AND is_active",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Replaces stored OAuth tokens after a refresh-grant rotation.
pub async fn update_tokens(
    pool: &PgPool,
    account_id: Uuid,
    access_token: &str,
    refresh_token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE social_media_accounts
        SET access_token = $2, refresh_token = COALESCE($3, refresh_token), updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(account_id)
    .bind(access_token)
    .bind(refresh_token)
    .execute(pool)
    .await?;
    Ok(())
}
