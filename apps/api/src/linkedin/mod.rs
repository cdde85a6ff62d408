/// LinkedIn connector: OAuth token exchange and profile/stats fetches.
///
/// The callback flow is linear: exchange the authorization code, fetch the
/// member profile, fetch userinfo stats, persist. Each step surfaces its
/// failure as an error code the handler turns into a frontend redirect.
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};
use urlencoding::encode;

use crate::config::LinkedInConfig;

pub mod handlers;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum LinkedInError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LinkedIn API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

/// Token endpoint response for both authorization-code and refresh grants.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// `/v2/me` response. LinkedIn localizes names as `{locale: value}` maps;
/// the first localized value wins.
#[derive(Debug, Default, Deserialize)]
pub struct LinkedInProfile {
    pub id: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<LocalizedName>,
    #[serde(rename = "lastName")]
    pub last_name: Option<LocalizedName>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<ProfilePicture>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub localized: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfilePicture {
    #[serde(rename = "displayImage")]
    pub display_image: Option<DisplayImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplayImage {
    #[serde(default)]
    pub elements: Vec<DisplayImageElement>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplayImageElement {
    #[serde(default)]
    pub identifiers: Vec<ImageIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageIdentifier {
    pub identifier: Option<String>,
}

impl LinkedInProfile {
    pub fn full_name(&self) -> String {
        let mut full_name = String::new();
        if let Some(first) = self
            .first_name
            .as_ref()
            .and_then(|n| n.localized.values().next())
        {
            full_name.push_str(first);
        }
        if let Some(last) = self
            .last_name
            .as_ref()
            .and_then(|n| n.localized.values().next())
        {
            if !full_name.is_empty() {
                full_name.push(' ');
            }
            full_name.push_str(last);
        }
        full_name
    }

    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_picture
            .as_ref()?
            .display_image
            .as_ref()?
            .elements
            .first()?
            .identifiers
            .first()?
            .identifier
            .as_deref()
    }
}

/// `/v2/userinfo` response. Connection counts come back under several
/// different keys depending on scope; see [`effective_connections_count`].
///
/// [`effective_connections_count`]: LinkedInStats::effective_connections_count
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LinkedInStats {
    #[serde(rename = "firstDegreeSize")]
    pub connections_count: Option<i64>,
    #[serde(rename = "numConnections")]
    pub total_connections: Option<i64>,
    #[serde(rename = "numFollowers")]
    pub followers: Option<i64>,
    #[serde(rename = "numConnectionsRange")]
    pub connections_range: Option<String>,
    pub email: Option<String>,
}

impl LinkedInStats {
    pub fn followers_count(&self) -> i64 {
        self.followers.unwrap_or(0)
    }

    /// Best available connections count: exact first-degree size, then the
    /// total, then the upper bound of a range string ("500+" -> 500,
    /// "100-200" -> 200), else 0.
    pub fn effective_connections_count(&self) -> i64 {
        if let Some(count) = self.connections_count.filter(|c| *c > 0) {
            return count;
        }
        if let Some(count) = self.total_connections.filter(|c| *c > 0) {
            return count;
        }
        if let Some(range) = self.connections_range.as_deref() {
            if let Some(base) = range.strip_suffix('+') {
                if let Ok(count) = base.trim().parse::<i64>() {
                    return count;
                }
            } else if let Some((_, upper)) = range.split_once('-') {
                if let Ok(count) = upper.trim().parse::<i64>() {
                    return count;
                }
            }
        }
        0
    }
}

/// The single LinkedIn HTTP client used by the OAuth handlers and the
/// account stat refresh path.
#[derive(Clone)]
pub struct LinkedInClient {
    http: Client,
    config: LinkedInConfig,
}

impl LinkedInClient {
    pub fn new(config: LinkedInConfig) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .user_agent(concat!("crosspost/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }

    /// Builds the browser-facing authorization URL for the code flow.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}",
            self.config.authorization_uri,
            self.config.client_id,
            encode(&self.config.redirect_uri),
            encode(&self.config.scope),
        )
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, LinkedInError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_uri),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await?;

        parse_response(response).await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, LinkedInError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await?;

        parse_response(response).await
    }

    pub async fn fetch_profile(&self, access_token: &str) -> Result<LinkedInProfile, LinkedInError> {
        let response = self
            .http
            .get(format!("{}/me", self.config.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        parse_response(response).await
    }

    pub async fn fetch_stats(&self, access_token: &str) -> Result<LinkedInStats, LinkedInError> {
        let response = self
            .http
            .get(format!("{}/userinfo", self.config.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Cheap probe used to check whether a stored access token still works.
    pub async fn validate_token(&self, access_token: &str) -> bool {
        let response = self
            .http
            .get(format!("{}/people/~:(id)", self.config.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await;

        match response {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                debug!("Access token validation failed: {e}");
                false
            }
        }
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LinkedInError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("LinkedIn API error response: {body}");
        return Err(LinkedInError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LinkedInClient {
        LinkedInClient::new(LinkedInConfig {
            client_id: "client123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/api/oauth/linkedin/callback".to_string(),
            scope: "r_liteprofile,r_emailaddress,w_member_social".to_string(),
            authorization_uri: "https://www.linkedin.com/oauth/v2/authorization".to_string(),
            token_uri: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            api_base_url: "https://api.linkedin.com/v2".to_string(),
        })
    }

    #[test]
    fn authorization_url_encodes_redirect_and_scope() {
        let url = client().authorization_url();
        assert!(url.starts_with("https://www.linkedin.com/oauth/v2/authorization?response_type=code"));
        assert!(url.contains("client_id=client123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Foauth%2Flinkedin%2Fcallback"));
        assert!(url.contains("scope=r_liteprofile%2Cr_emailaddress%2Cw_member_social"));
    }

    #[test]
    fn full_name_joins_localized_parts() {
        let profile: LinkedInProfile = serde_json::from_str(
            r#"{
                "id": "abc123",
                "firstName": {"localized": {"en_US": "Ada"}},
                "lastName": {"localized": {"en_US": "Lovelace"}}
            }"#,
        )
        .unwrap();
        assert_eq!(profile.full_name(), "Ada Lovelace");
    }

    #[test]
    fn full_name_tolerates_missing_parts() {
        let profile: LinkedInProfile =
            serde_json::from_str(r#"{"id": "abc123", "firstName": {"localized": {"en_US": "Ada"}}}"#)
                .unwrap();
        assert_eq!(profile.full_name(), "Ada");

        let empty: LinkedInProfile = serde_json::from_str(r#"{"id": "abc123"}"#).unwrap();
        assert_eq!(empty.full_name(), "");
    }

    #[test]
    fn profile_image_url_walks_display_image_elements() {
        let profile: LinkedInProfile = serde_json::from_str(
            r#"{
                "profilePicture": {
                    "displayImage": {
                        "elements": [
                            {"identifiers": [{"identifier": "https://media.licdn.com/pic"}]}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            profile.profile_image_url(),
            Some("https://media.licdn.com/pic")
        );
    }

    #[test]
    fn effective_connections_prefers_first_degree_size() {
        let stats = LinkedInStats {
            connections_count: Some(321),
            total_connections: Some(1000),
            ..Default::default()
        };
        assert_eq!(stats.effective_connections_count(), 321);
    }

    #[test]
    fn effective_connections_falls_back_to_total() {
        let stats = LinkedInStats {
            total_connections: Some(42),
            ..Default::default()
        };
        assert_eq!(stats.effective_connections_count(), 42);
    }

    #[test]
    fn effective_connections_parses_plus_range() {
        let stats = LinkedInStats {
            connections_range: Some("500+".to_string()),
            ..Default::default()
        };
        assert_eq!(stats.effective_connections_count(), 500);
    }

    #[test]
    fn effective_connections_parses_bounded_range() {
        let stats = LinkedInStats {
            connections_range: Some("100-200".to_string()),
            ..Default::default()
        };
        assert_eq!(stats.effective_connections_count(), 200);
    }

    #[test]
    fn effective_connections_defaults_to_zero() {
        let stats = LinkedInStats {
            connections_range: Some("lots".to_string()),
            ..Default::default()
        };
        assert_eq!(stats.effective_connections_count(), 0);
        assert_eq!(LinkedInStats::default().effective_connections_count(), 0);
    }

    #[test]
    fn token_response_parses_minimal_body() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "tok", "expires_in": 5184000}"#).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, Some(5184000));
        assert!(token.refresh_token.is_none());
    }
}
