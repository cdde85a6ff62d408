use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: i64,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_temperature: f64,
    pub gemini_max_tokens: u32,
    pub linkedin: LinkedInConfig,
    pub frontend_url: String,
    pub scheduler_interval_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

/// LinkedIn OAuth endpoints and client credentials.
/// Endpoint URLs are overridable so tests and staging can point elsewhere.
#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub authorization_uri: String,
    pub token_uri: String,
    pub api_base_url: String,
}

const DEFAULT_LINKEDIN_SCOPE: &str = "r_liteprofile,r_emailaddress,w_member_social";
const DEFAULT_LINKEDIN_AUTHORIZATION_URI: &str = "https://www.linkedin.com/oauth/v2/authorization";
const DEFAULT_LINKEDIN_TOKEN_URI: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const DEFAULT_LINKEDIN_API_BASE_URL: &str = "https://api.linkedin.com/v2";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_expiration_secs: env_or("JWT_EXPIRATION_SECS", "86400")
                .parse::<i64>()
                .context("JWT_EXPIRATION_SECS must be a number of seconds")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            gemini_temperature: env_or("GEMINI_TEMPERATURE", "0.2")
                .parse::<f64>()
                .context("GEMINI_TEMPERATURE must be a number")?,
            gemini_max_tokens: env_or("GEMINI_MAX_TOKENS", "1024")
                .parse::<u32>()
                .context("GEMINI_MAX_TOKENS must be a number")?,
            linkedin: LinkedInConfig {
                client_id: require_env("LINKEDIN_CLIENT_ID")?,
                client_secret: require_env("LINKEDIN_CLIENT_SECRET")?,
                redirect_uri: require_env("LINKEDIN_REDIRECT_URI")?,
                scope: env_or("LINKEDIN_SCOPE", DEFAULT_LINKEDIN_SCOPE),
                authorization_uri: env_or(
                    "LINKEDIN_AUTHORIZATION_URI",
                    DEFAULT_LINKEDIN_AUTHORIZATION_URI,
                ),
                token_uri: env_or("LINKEDIN_TOKEN_URI", DEFAULT_LINKEDIN_TOKEN_URI),
                api_base_url: env_or("LINKEDIN_API_BASE_URL", DEFAULT_LINKEDIN_API_BASE_URL),
            },
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            scheduler_interval_secs: env_or("SCHEDULER_INTERVAL_SECS", "60")
                .parse::<u64>()
                .context("SCHEDULER_INTERVAL_SECS must be a number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
