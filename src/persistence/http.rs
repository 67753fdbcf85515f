//! REST gateway: `PUT {api_url}/sections/{id}` with the settings as JSON.

use crate::config::PersistenceConfig;
use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::section::{SectionId, SectionSettings};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[derive(Serialize)]
struct SaveRequest<'a> {
    section_id: &'a SectionId,
    settings: &'a SectionSettings,
}

pub struct HttpGateway {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &PersistenceConfig) -> Result<Self, PersistenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| PersistenceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: Self::normalize(&config.api_url)?,
            api_token: config.api_token.clone(),
        })
    }

    /// Joining relative paths needs a trailing slash on the base.
    fn normalize(api_url: &str) -> Result<Url, PersistenceError> {
        let mut url = Url::parse(api_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn endpoint(&self, section_id: &SectionId) -> Result<Url, PersistenceError> {
        Ok(self.base_url.join(&format!("sections/{}", section_id))?)
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for HttpGateway {
    #[instrument(skip(self, settings))]
    async fn save(&self, section_id: &SectionId, settings: &SectionSettings) -> Result<(), PersistenceError> {
        let endpoint = self.endpoint(section_id)?;
        let body = SaveRequest { section_id, settings };

        let mut request = self
            .client
            .put(endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                PersistenceError::Transport("request timed out".to_string())
            } else if e.is_connect() {
                PersistenceError::Transport("unable to reach the backend".to_string())
            } else {
                PersistenceError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PersistenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "section saved");
        Ok(())
    }
}
