use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use crate::posts::{platforms, store};
use crate::state::AppState;

/// Spawns the background publisher: every tick, SCHEDULED posts whose time
/// has passed are promoted to PUBLISHED along with their enabled platform
/// targets. Per-post failures are logged and do not stop the sweep.
pub fn spawn(state: AppState) {
    let interval = Duration::from_secs(state.config.scheduler_interval_secs);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = publish_due_posts(&state).await {
                error!("Scheduled publish sweep failed: {e}");
            }
        }
    });
}

async fn publish_due_posts(state: &AppState) -> Result<(), sqlx::Error> {
    let due = store::list_due_scheduled(&state.db, Utc::now()).await?;
    if due.is_empty() {
        return Ok(());
    }

    info!("Publishing {} due scheduled post(s)", due.len());

    for post in due {
        match store::set_published(&state.db, post.id).await {
            Ok(_) => {
                if let Err(e) = platforms::mark_published_for_post(&state.db, post.id).await {
                    error!(post_id = %post.id, "Failed to mark platform targets published: {e}");
                }
            }
            Err(e) => error!(post_id = %post.id, "Failed to publish scheduled post: {e}"),
        }
    }

    Ok(())
}
