use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::SocialMediaAccount;
use crate::models::platform::Platform;
use crate::state::AppState;

pub mod handlers;
pub mod store;

pub struct NewAccount<'a> {
    pub platform: Platform,
    pub account_name: &'a str,
    pub account_username: Option<&'a str>,
    pub access_token: Option<&'a str>,
    pub refresh_token: Option<&'a str>,
}

/// Connects an account after checking it is not already connected.
pub async fn add_account(
    pool: &PgPool,
    user_id: Uuid,
    new: NewAccount<'_>,
) -> Result<SocialMediaAccount, AppError> {
    if store::exists_for_user(pool, user_id, new.platform.as_str(), new.account_username).await? {
        return Err(AppError::Conflict(
            "Account already connected for this platform".to_string(),
        ));
    }

    Ok(store::insert_account(
        pool,
        user_id,
        new.platform.as_str(),
        new.account_name,
        new.account_username,
        new.access_token,
        new.refresh_token,
    )
    .await?)
}

/// Refreshes stored stats for one account. LinkedIn accounts with a stored
/// access token hit the live API; the other platforms are stubs that only
/// bump `updated_at`.
pub async fn refresh_account_stats(
    state: &AppState,
    account: &SocialMediaAccount,
) -> Result<(), AppError> {
    match account.platform.parse::<Platform>() {
        Ok(Platform::Linkedin) => {
            let Some(token) = account.access_token.as_deref() else {
                store::touch(&state.db, account.id).await?;
                return Ok(());
            };

            match state.linkedin.fetch_stats(token).await {
                Ok(stats) => {
                    store::update_stats(
                        &state.db,
                        account.id,
                        stats.followers_count(),
                        stats.effective_connections_count(),
                        account.posts_count,
                    )
                    .await?;
                }
                Err(e) => {
                    // Stale stats are better than a failed refresh sweep.
                    warn!(account_id = %account.id, "LinkedIn stats refresh failed: {e}");
                    store::touch(&state.db, account.id).await?;
                }
            }
        }
        Ok(_) => {
            store::touch(&state.db, account.id).await?;
        }
        Err(e) => {
            warn!(account_id = %account.id, "Skipping refresh: {e}");
        }
    }

    Ok(())
}
