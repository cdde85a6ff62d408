use sqlx::PgPool;
use uuid::Uuid;

use crate::models::platform::Platform;
use crate::models::settings::PlatformSettings;

pub async fn list_active_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PlatformSettings>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM platform_settings WHERE user_id = $1 AND is_active ORDER BY platform",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    user_id: Uuid,
    platform: Platform,
) -> Result<Option<PlatformSettings>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM platform_settings WHERE user_id = $1 AND platform = $2")
        .bind(user_id)
        .bind(platform.as_str())
        .fetch_optional(pool)
        .await
}

/// Create-or-update; updating an inactive row reactivates it.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    platform: Platform,
    default_prompt: Option<&str>,
) -> Result<PlatformSettings, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO platform_settings (user_id, platform, default_prompt)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, platform)
        DO UPDATE SET default_prompt = $3, is_active = TRUE, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(platform.as_str())
    .bind(default_prompt)
    .fetch_one(pool)
    .await
}

/// Updates the prompt of an existing row without reviving inactive ones.
pub async fn update_prompt(
    pool: &PgPool,
    user_id: Uuid,
    platform: Platform,
    default_prompt: Option<&str>,
) -> Result<Option<PlatformSettings>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE platform_settings
        SET default_prompt = $3, updated_at = now()
        WHERE user_id = $1 AND platform = $2
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(platform.as_str())
    .bind(default_prompt)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, user_id: Uuid, platform: Platform) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM platform_settings WHERE user_id = $1 AND platform = $2")
        .bind(user_id)
        .bind(platform.as_str())
        .execute(pool)
        .await?;
    Ok(())
}
