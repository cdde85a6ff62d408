use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user default AI prompt for one platform. `(user_id, platform)` is
/// unique; deactivated rows are kept and revived on the next upsert.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub default_prompt: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
