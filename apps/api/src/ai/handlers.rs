use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::ai::{self, prompts, AiContentRequest, AiContentResponse};
use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/ai/generate
pub async fn generate(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<AiContentRequest>,
) -> Result<Json<AiContentResponse>, AppError> {
    let topic = req.validate()?.to_string();
    let prompt = prompts::build_generate_prompt(&req.platform, &req.tone, &req.content_type, &topic);

    match state.gemini.generate(&prompt).await {
        Ok(text) => Ok(Json(AiContentResponse::content(
            text,
            &req.tone,
            &req.platform,
        ))),
        Err(e) => {
            error!("Error generating content: {e}");
            Ok(Json(AiContentResponse::failure(format!(
                "Failed to generate content: {e}"
            ))))
        }
    }
}

/// POST /api/ai/improve
pub async fn improve(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<AiContentRequest>,
) -> Result<Json<AiContentResponse>, AppError> {
    let existing = req
        .existing_content()
        .ok_or_else(|| {
            AppError::Validation("Existing content is required for improvement".to_string())
        })?
        .to_string();
    let context = req.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let prompt = prompts::build_improve_prompt(&req.platform, &req.tone, &existing, context);

    match state.gemini.generate(&prompt).await {
        Ok(text) => Ok(Json(AiContentResponse::content(
            text,
            &req.tone,
            &req.platform,
        ))),
        Err(e) => {
            error!("Error improving content: {e}");
            Ok(Json(AiContentResponse::failure(format!(
                "Failed to improve content: {e}"
            ))))
        }
    }
}

/// POST /api/ai/hashtags
pub async fn hashtags(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<AiContentRequest>,
) -> Result<Json<AiContentResponse>, AppError> {
    // Prefer the content being tagged; fall back to the topic prompt.
    let source = match req.existing_content() {
        Some(content) => content.to_string(),
        None => req.validate()?.to_string(),
    };
    let prompt = prompts::build_hashtag_prompt(&req.platform, &source);

    match state.gemini.generate(&prompt).await {
        Ok(text) => Ok(Json(AiContentResponse::hashtags(
            ai::extract_hashtags(&text),
            &req.platform,
        ))),
        Err(e) => {
            error!("Error generating hashtags: {e}");
            Ok(Json(AiContentResponse::failure(format!(
                "Failed to generate hashtags: {e}"
            ))))
        }
    }
}

/// POST /api/ai/variations
pub async fn variations(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<AiContentRequest>,
) -> Result<Json<AiContentResponse>, AppError> {
    let source = match req.existing_content() {
        Some(content) => content.to_string(),
        None => req.validate()?.to_string(),
    };
    let prompt = prompts::build_variations_prompt(&req.platform, &req.tone, &source);

    match state.gemini.generate(&prompt).await {
        Ok(text) => Ok(Json(AiContentResponse::variations(
            ai::split_variations(&text),
            &req.tone,
            &req.platform,
        ))),
        Err(e) => {
            error!("Error generating variations: {e}");
            Ok(Json(AiContentResponse::failure(format!(
                "Failed to generate variations: {e}"
            ))))
        }
    }
}

/// GET /api/ai/status
pub async fn status(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Json<Value> {
    Json(json!({
        "status": "available",
        "model": state.gemini.model()
    }))
}
