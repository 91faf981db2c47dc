//! update
//!
//! Checking for a newer release.
//!
//! The release endpoint follows the GitHub "latest release" shape; only
//! `tag_name` and `html_url` are read. Versions compare as dotted numbers
//! with an optional leading `v`.
//!
//! # Example
//!
//! ```
//! use launchdeck::update::is_newer;
//!
//! assert!(is_newer("1.2.0", "v1.10.0"));
//! assert!(!is_newer("1.2.0", "1.2"));
//! ```

use std::cmp::Ordering;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of this build.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const USER_AGENT_VALUE: &str = concat!("launchdeck/", env!("CARGO_PKG_VERSION"));
const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the release check.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("release check failed with status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse release response: {0}")]
    Parse(String),
}

/// The fields read from a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub html_url: String,
}

/// Result of comparing the running version with the latest release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub current_version: String,
    pub latest_version: String,
    pub update_available: bool,
    pub release_url: String,
}

impl UpdateStatus {
    pub fn from_release(current: &str, release: &ReleaseInfo) -> Self {
        Self {
            current_version: current.to_string(),
            latest_version: strip_v(&release.tag_name).to_string(),
            update_available: is_newer(current, &release.tag_name),
            release_url: release.html_url.clone(),
        }
    }
}

/// Client for a release endpoint.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    client: Client,
    api_url: String,
}

impl ReleaseClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// Fetch the latest release.
    pub async fn latest(&self) -> Result<ReleaseInfo, UpdateError> {
        let response = self
            .client
            .get(&self.api_url)
            .headers(Self::headers())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| UpdateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::Status(status.as_u16()));
        }

        response
            .json::<ReleaseInfo>()
            .await
            .map_err(|e| UpdateError::Parse(e.to_string()))
    }

    /// Compare `current` with the latest release.
    pub async fn check(&self, current: &str) -> Result<UpdateStatus, UpdateError> {
        let release = self.latest().await?;
        Ok(UpdateStatus::from_release(current, &release))
    }
}

fn strip_v(version: &str) -> &str {
    let version = version.trim();
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

fn components(version: &str) -> Vec<u64> {
    strip_v(version)
        .split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

/// Compare two dotted versions. Missing or non-numeric parts count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (components(a), components(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Whether `latest` is strictly newer than `current`.
pub fn is_newer(current: &str, latest: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}
