//! HTTP launch source
//!
//! Fetches the launch list with a single GET using reqwest. Non-2xx
//! responses are turned into `LaunchError::HttpError` with the response body
//! as the message; a 2xx body must be a JSON array of launches.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{parse_launches, Launch, LaunchError, LaunchSource};
use crate::sequence::LaunchesConfig;

#[derive(Debug, Clone)]
pub struct HttpLaunchSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpLaunchSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LaunchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LaunchError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    pub fn from_config(config: &LaunchesConfig) -> Result<Self, LaunchError> {
        Self::new(&config.endpoint, Duration::from_millis(config.timeout_ms))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LaunchSource for HttpLaunchSource {
    async fn launches(&self) -> Result<Vec<Launch>, LaunchError> {
        info!(endpoint = %self.endpoint, "Fetching launches");
        let start = std::time::Instant::now();

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Launches response received"
        );

        if !status.is_success() {
            return Err(LaunchError::HttpError {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_launches(&body)
    }
}
