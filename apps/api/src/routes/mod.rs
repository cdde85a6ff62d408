pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::posts::platforms;
use crate::state::AppState;
use crate::{accounts, ai, auth, dashboard, linkedin, posts, settings};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handlers::register))
        .route("/api/auth/login", post(auth::handlers::login))
        // Posts
        .route(
            "/api/posts",
            get(posts::handlers::get_posts).post(posts::handlers::create_post),
        )
        .route("/api/posts/drafts", get(posts::handlers::get_drafts))
        .route("/api/posts/published", get(posts::handlers::get_published))
        .route(
            "/api/posts/:post_id",
            get(posts::handlers::get_post)
                .put(posts::handlers::update_post)
                .delete(posts::handlers::delete_post),
        )
        .route(
            "/api/posts/:post_id/schedule",
            post(posts::handlers::schedule_post),
        )
        .route(
            "/api/posts/:post_id/publish",
            post(posts::handlers::publish_post),
        )
        .route(
            "/api/posts/:post_id/engagement",
            post(posts::handlers::update_engagement),
        )
        // Per-post platform targeting
        .route(
            "/api/posts/:post_id/platforms",
            get(platforms::get_platforms),
        )
        .route(
            "/api/posts/:post_id/platforms/:platform",
            put(platforms::put_platform).delete(platforms::delete_platform),
        )
        .route(
            "/api/posts/:post_id/platforms/:platform/enable",
            post(platforms::enable_platform),
        )
        .route(
            "/api/posts/:post_id/platforms/:platform/disable",
            post(platforms::disable_platform),
        )
        .route(
            "/api/posts/:post_id/platforms/:platform/schedule",
            post(platforms::schedule_platform),
        )
        // Social accounts
        .route(
            "/api/social-media/accounts",
            get(accounts::handlers::get_accounts),
        )
        .route(
            "/api/social-media/connect",
            post(accounts::handlers::connect_account),
        )
        .route(
            "/api/social-media/accounts/:account_id",
            delete(accounts::handlers::disconnect_account),
        )
        .route(
            "/api/social-media/accounts/:account_id/refresh",
            post(accounts::handlers::refresh_account),
        )
        // LinkedIn OAuth
        .route(
            "/api/oauth/linkedin/authorize",
            get(linkedin::handlers::authorize),
        )
        .route(
            "/api/oauth/linkedin/callback",
            get(linkedin::handlers::callback),
        )
        .route(
            "/api/oauth/linkedin/refresh/:account_id",
            post(linkedin::handlers::refresh),
        )
        // AI content
        .route("/api/ai/generate", post(ai::handlers::generate))
        .route("/api/ai/improve", post(ai::handlers::improve))
        .route("/api/ai/hashtags", post(ai::handlers::hashtags))
        .route("/api/ai/variations", post(ai::handlers::variations))
        .route("/api/ai/status", get(ai::handlers::status))
        // Platform settings
        .route(
            "/api/platform-settings",
            get(settings::handlers::get_settings),
        )
        .route(
            "/api/platform-settings/:platform",
            get(settings::handlers::get_setting)
                .post(settings::handlers::upsert_setting)
                .put(settings::handlers::update_setting)
                .delete(settings::handlers::delete_setting),
        )
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::handlers::get_stats))
        .route(
            "/api/dashboard/refresh",
            post(dashboard::handlers::refresh_all),
        )
        .with_state(state)
}
