use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Social network identifier attached to accounts, posts and settings.
/// Stored as text in the database (`TWITTER`, `FACEBOOK`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "TWITTER",
            Platform::Facebook => "FACEBOOK",
            Platform::Instagram => "INSTAGRAM",
            Platform::Linkedin => "LINKEDIN",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TWITTER" => Ok(Platform::Twitter),
            "FACEBOOK" => Ok(Platform::Facebook),
            "INSTAGRAM" => Ok(Platform::Instagram),
            "LINKEDIN" => Ok(Platform::Linkedin),
            other => Err(format!("Unknown platform: {other}")),
        }
    }
}

/// Lifecycle of a post in the authoring workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Published => "PUBLISHED",
            PostStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-platform publish outcome for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishStatus {
    Pending,
    Published,
    Failed,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Pending => "PENDING",
            PublishStatus::Published => "PUBLISHED",
            PublishStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        for platform in [
            Platform::Twitter,
            Platform::Facebook,
            Platform::Instagram,
            Platform::Linkedin,
        ] {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!("linkedin".parse::<Platform>(), Ok(Platform::Linkedin));
        assert_eq!("Twitter".parse::<Platform>(), Ok(Platform::Twitter));
    }

    #[test]
    fn platform_parse_rejects_unknown() {
        assert!("MYSPACE".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_serializes_uppercase() {
        let json = serde_json::to_string(&Platform::Linkedin).unwrap();
        assert_eq!(json, "\"LINKEDIN\"");
    }

    #[test]
    fn post_status_serializes_uppercase() {
        let json = serde_json::to_string(&PostStatus::Draft).unwrap();
        assert_eq!(json, "\"DRAFT\"");
    }
}
