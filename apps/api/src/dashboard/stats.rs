use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::accounts::store as account_store;
use crate::errors::AppError;
use crate::models::account::SocialMediaAccount;
use crate::models::platform::PostStatus;
use crate::posts::store as post_store;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub connected_accounts: Vec<SocialMediaAccount>,
    pub post_statistics: PostStatistics,
    pub total_followers: i64,
    pub total_following: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStatistics {
    pub total_posts: i64,
    pub draft_posts: i64,
    pub published_posts: i64,
    pub scheduled_posts: i64,
    pub total_engagement: i64,
    pub total_likes: i64,
    pub total_shares: i64,
    pub total_comments: i64,
}

/// Assembles the dashboard aggregate for one user. All sums come back as 0
/// rather than NULL when there is nothing to count.
pub async fn dashboard_stats(pool: &PgPool, user_id: Uuid) -> Result<DashboardStats, AppError> {
    let connected_accounts = account_store::list_active_by_user(pool, user_id).await?;

    let (total_engagement, total_likes, total_shares, total_comments) =
        post_store::engagement_totals_by_user(pool, user_id).await?;

    let post_statistics = PostStatistics {
        total_posts: post_store::count_by_user(pool, user_id).await?,
        draft_posts: post_store::count_by_user_and_status(pool, user_id, PostStatus::Draft).await?,
        published_posts: post_store::count_by_user_and_status(pool, user_id, PostStatus::Published)
            .await?,
        scheduled_posts: post_store::count_by_user_and_status(pool, user_id, PostStatus::Scheduled)
            .await?,
        total_engagement,
        total_likes,
        total_shares,
        total_comments,
    };

    let total_followers = account_store::total_followers_by_user(pool, user_id).await?;
    let total_following = account_store::total_following_by_user(pool, user_id).await?;

    Ok(DashboardStats {
        connected_accounts,
        post_statistics,
        total_followers,
        total_following,
    })
}
