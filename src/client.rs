use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{Profile, Recommendation, ServiceStatus};
use crate::normalize;

/// Anything that can turn a profile into recommendations. The HTTP client is
/// the only production implementation; tests swap in fakes.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(&self, profile: &Profile) -> Result<Vec<Recommendation>, ClientError>;
}

#[derive(Clone)]
pub struct HttpRecommendationClient {
    client: Client,
    base_url: String,
}

impl HttpRecommendationClient {
    /// No request timeout is set; the transport default applies.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the service's root endpoint, which reports whether the
    /// catalogue is loaded.
    pub async fn status(&self) -> Result<ServiceStatus, ClientError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn recommend(&self, profile: &Profile) -> Result<Vec<Recommendation>, ClientError> {
        let url = format!("{}/recommend", self.base_url);
        debug!(%url, name = %profile.name, field = profile.field.label(), "sending profile");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(profile)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            warn!("scoring service returned {}", status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await?;
        let raw: Vec<Value> = serde_json::from_str(&body)?;
        debug!(records = raw.len(), "received recommendations");

        Ok(normalize::normalize_all(&raw))
    }
}
