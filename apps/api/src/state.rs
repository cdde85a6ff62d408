use sqlx::PgPool;

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::linkedin::LinkedInClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub gemini: GeminiClient,
    pub linkedin: LinkedInClient,
    pub config: Config,
}
