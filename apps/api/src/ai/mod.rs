use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub mod handlers;
pub mod prompts;

const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiContentRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub existing_content: Option<String>,
}

fn default_tone() -> String {
    "neutral".to_string()
}

fn default_platform() -> String {
    "general".to_string()
}

fn default_content_type() -> String {
    "post".to_string()
}

impl AiContentRequest {
    /// Prompt is required and capped; the cap keeps request bodies from
    /// ballooning the outbound Gemini call.
    pub fn validate(&self) -> Result<&str, AppError> {
        let prompt = self
            .prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("Prompt is required".to_string()))?;

        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(AppError::Validation(format!(
                "Prompt must be less than {MAX_PROMPT_CHARS} characters"
            )));
        }

        Ok(prompt)
    }

    pub fn existing_content(&self) -> Option<&str> {
        self.existing_content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiContentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AiContentResponse {
    fn base() -> Self {
        Self {
            generated_content: None,
            hashtags: None,
            variations: None,
            tone: None,
            platform: None,
            generated_at: Utc::now(),
            success: true,
            error_message: None,
        }
    }

    pub fn content(text: String, tone: &str, platform: &str) -> Self {
        Self {
            generated_content: Some(text),
            tone: Some(tone.to_string()),
            platform: Some(platform.to_string()),
            ..Self::base()
        }
    }

    pub fn hashtags(hashtags: Vec<String>, platform: &str) -> Self {
        Self {
            hashtags: Some(hashtags),
            platform: Some(platform.to_string()),
            ..Self::base()
        }
    }

    pub fn variations(variations: Vec<String>, tone: &str, platform: &str) -> Self {
        Self {
            variations: Some(variations),
            tone: Some(tone.to_string()),
            platform: Some(platform.to_string()),
            ..Self::base()
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            error_message: Some(message),
            ..Self::base()
        }
    }
}

static HASHTAG_RE: OnceLock<Regex> = OnceLock::new();

/// Pulls `#word` tokens out of model output.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let re = HASHTAG_RE.get_or_init(|| Regex::new(r"#\w+").expect("valid hashtag regex"));
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Splits variation output on blank lines, dropping empty segments.
pub fn split_variations(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: Option<&str>) -> AiContentRequest {
        AiContentRequest {
            prompt: prompt.map(str::to_string),
            tone: default_tone(),
            platform: default_platform(),
            content_type: default_content_type(),
            existing_content: None,
        }
    }

    #[test]
    fn validate_rejects_missing_prompt() {
        assert!(request(None).validate().is_err());
        assert!(request(Some("   ")).validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_prompt() {
        let long = "x".repeat(MAX_PROMPT_CHARS + 1);
        assert!(request(Some(&long)).validate().is_err());
    }

    #[test]
    fn validate_trims_prompt() {
        assert_eq!(request(Some("  rust tips  ")).validate().unwrap(), "rust tips");
    }

    #[test]
    fn request_defaults_apply() {
        let req: AiContentRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
        assert_eq!(req.tone, "neutral");
        assert_eq!(req.platform, "general");
        assert_eq!(req.content_type, "post");
    }

    #[test]
    fn extracts_hashtags_from_lines() {
        let text = "#RustLang\nsome chatter\n#WebDev #AI\n";
        assert_eq!(extract_hashtags(text), vec!["#RustLang", "#WebDev", "#AI"]);
    }

    #[test]
    fn extract_hashtags_handles_no_matches() {
        assert!(extract_hashtags("nothing here").is_empty());
    }

    #[test]
    fn splits_variations_on_blank_lines() {
        let text = "First take.\n\nSecond take.\n\n\nThird take.";
        assert_eq!(
            split_variations(text),
            vec!["First take.", "Second take.", "Third take."]
        );
    }

    #[test]
    fn failure_response_carries_message() {
        let response = AiContentResponse::failure("boom".to_string());
        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some("boom"));
    }
}
