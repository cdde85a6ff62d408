use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, info};

use crate::auth::{jwt, store};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if !is_valid_email(&req.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if store::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username is already taken!".to_string()));
    }
    if store::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email is already in use!".to_string()));
    }

    // bcrypt is CPU-bound; keep it off the async executor.
    let password = req.password.clone();
    let password_hash = task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?;

    let user = store::insert_user(&state.db, &req.username, &req.email, &password_hash).await?;
    info!(user_id = %user.id, "User registered successfully");

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    debug!("User login attempt");

    let user = store::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| AppError::Validation("Invalid username or password".to_string()))?;

    let password = req.password.clone();
    let password_hash = user.password_hash.clone();
    let is_valid = task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification task failed: {e}")))?
        .unwrap_or(false);

    if !is_valid {
        return Err(AppError::Validation(
            "Invalid username or password".to_string(),
        ));
    }

    let token = jwt::issue_token(
        &user.username,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to generate token: {e}")))?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@nodot"));
        assert!(!is_valid_email("alice@.com"));
        assert!(!is_valid_email("alice@example."));
    }

    #[test]
    fn bcrypt_verify_round_trips() {
        // Cost 4 (bcrypt's minimum) keeps the test fast; production uses DEFAULT_COST.
        let hash = bcrypt::hash("password123", 4).unwrap();
        assert!(bcrypt::verify("password123", &hash).unwrap());
        assert!(!bcrypt::verify("wrongpassword", &hash).unwrap());
    }
}
