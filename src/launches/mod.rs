//! Launch data for mission patch listings
//!
//! This module provides sources of launch records:
//! - `http`: fetches a JSON array of launches over HTTP
//! - `StaticLaunchSource`: serves a fixed list, e.g. one parsed from a file
//!
//! Only the fields needed to find each launch's small mission patch image
//! are decoded; everything else in the payload is ignored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::HttpLaunchSource;

/// Errors from fetching or decoding launches
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Invalid launch data: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchLinks {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchLinks {
    #[serde(default)]
    pub patch: Option<PatchLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub links: Option<LaunchLinks>,
}

impl Launch {
    /// URL of the small mission patch image, if the launch has one
    pub fn patch_image(&self) -> Option<&str> {
        self.links
            .as_ref()?
            .patch
            .as_ref()?
            .small
            .as_deref()
    }
}

/// Parse a JSON array of launches
pub fn parse_launches(json: &str) -> Result<Vec<Launch>, LaunchError> {
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
pub trait LaunchSource: Send + Sync {
    async fn launches(&self) -> Result<Vec<Launch>, LaunchError>;
}

/// A source that always returns the same launches
#[derive(Debug, Clone, Default)]
pub struct StaticLaunchSource {
    launches: Vec<Launch>,
}

impl StaticLaunchSource {
    pub fn new(launches: Vec<Launch>) -> Self {
        Self { launches }
    }

    pub fn from_json(json: &str) -> Result<Self, LaunchError> {
        Ok(Self::new(parse_launches(json)?))
    }
}

#[async_trait]
impl LaunchSource for StaticLaunchSource {
    async fn launches(&self) -> Result<Vec<Launch>, LaunchError> {
        Ok(self.launches.clone())
    }
}

/// Patch image URLs of the first `limit` launches (all launches when `None`)
///
/// Launches without a small patch image are skipped, so fewer than `limit`
/// URLs may come back.
pub async fn mission_patches(
    source: &dyn LaunchSource,
    limit: Option<usize>,
) -> Result<Vec<String>, LaunchError> {
    let launches = source.launches().await?;
    let take = limit.unwrap_or(launches.len());

    let patches: Vec<String> = launches
        .iter()
        .take(take)
        .filter_map(|launch| launch.patch_image().map(str::to_string))
        .collect();

    tracing::debug!(
        launches = launches.len(),
        patches = patches.len(),
        "Collected mission patches"
    );
    Ok(patches)
}
