use std::time::Duration;

use anyhow::{Context, Result};
use landing_core::metrics::{LatestRelease, MetricsError, ReleaseRegistry};
use reqwest::blocking::Client;

/// Repository whose latest release feeds the landing metrics.
pub const DEFAULT_REPO: &str = "VladosFlexXx/imes_app";

pub fn release_endpoint(repo: &str) -> String {
    format!("https://api.github.com/repos/{repo}/releases/latest")
}

/// The concrete release registry: one HTTPS GET against the public
/// latest-release endpoint. No retries, no caching.
pub struct GithubRegistry {
    client: Client,
    endpoint: String,
}

impl GithubRegistry {
    pub fn new(repo: &str) -> Result<Self> {
        Self::with_endpoint(release_endpoint(repo))
    }

    pub fn with_endpoint(endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("myimes-landing/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build http client")?;
        Ok(Self { client, endpoint })
    }
}

impl ReleaseRegistry for GithubRegistry {
    fn latest_release(&self) -> Result<LatestRelease, MetricsError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|err| MetricsError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetricsError::Status(status.as_u16()));
        }
        response
            .json::<LatestRelease>()
            .map_err(|err| MetricsError::Payload(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_the_latest_release() {
        assert_eq!(
            release_endpoint("owner/repo"),
            "https://api.github.com/repos/owner/repo/releases/latest"
        );
    }
}
