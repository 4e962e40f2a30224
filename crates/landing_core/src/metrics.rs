use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Platform package extension looked up among release assets.
pub const PACKAGE_EXT: &str = ".apk";

/// Version label used when the release payload carries no tag.
pub const FALLBACK_VERSION: &str = "latest";

/// One asset of the latest release, as served by the release registry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

/// Latest-release metadata for the named repository.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LatestRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Derived, ephemeral snapshot of the release metrics. Never persisted,
/// never retried, never cached beyond the page session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseMetrics {
    pub version: String,
    pub total_downloads: u64,
    pub package_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl ReleaseMetrics {
    pub fn summarize(release: &LatestRelease) -> Self {
        let version = release
            .tag_name
            .clone()
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| FALLBACK_VERSION.to_string());
        let total_downloads = release.assets.iter().map(|a| a.download_count).sum();
        let package_url = release
            .assets
            .iter()
            .find(|a| a.name.to_ascii_lowercase().ends_with(PACKAGE_EXT))
            .and_then(|a| a.browser_download_url.clone());
        Self {
            version,
            total_downloads,
            package_url,
            fetched_at: Utc::now(),
        }
    }

    pub fn downloads_label(&self) -> String {
        format!("{} downloads", self.total_downloads)
    }
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("release request failed: {0}")]
    Request(String),
    #[error("release registry returned status {0}")]
    Status(u16),
    #[error("malformed release payload: {0}")]
    Payload(String),
}

/// The external release registry. The one network call of the system
/// lives behind this seam; failures are typed here and discarded at the
/// controller boundary.
pub trait ReleaseRegistry {
    fn latest_release(&self) -> Result<LatestRelease, MetricsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, count: u64, url: Option<&str>) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            download_count: count,
            browser_download_url: url.map(str::to_string),
        }
    }

    #[test]
    fn summarize_sums_downloads_and_picks_the_package_asset() {
        let release = LatestRelease {
            tag_name: Some("v1.2.0".to_string()),
            assets: vec![
                asset("app-v1.apk", 120, Some("https://example.com/app-v1.apk")),
                asset("notes.txt", 5, Some("https://example.com/notes.txt")),
            ],
        };
        let metrics = ReleaseMetrics::summarize(&release);
        assert_eq!(metrics.version, "v1.2.0");
        assert_eq!(metrics.total_downloads, 125);
        assert_eq!(
            metrics.package_url.as_deref(),
            Some("https://example.com/app-v1.apk")
        );
        assert_eq!(metrics.downloads_label(), "125 downloads");
    }

    #[test]
    fn package_extension_match_is_case_insensitive_and_first_wins() {
        let release = LatestRelease {
            tag_name: None,
            assets: vec![
                asset("installer.APK", 1, Some("https://example.com/a.apk")),
                asset("second.apk", 2, Some("https://example.com/b.apk")),
            ],
        };
        let metrics = ReleaseMetrics::summarize(&release);
        assert_eq!(metrics.version, FALLBACK_VERSION);
        assert_eq!(metrics.package_url.as_deref(), Some("https://example.com/a.apk"));
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let payload = r#"{"tag_name": null, "assets": [{"name": "app.apk"}]}"#;
        let release: LatestRelease = serde_json::from_str(payload).expect("parse payload");
        let metrics = ReleaseMetrics::summarize(&release);
        assert_eq!(metrics.version, FALLBACK_VERSION);
        assert_eq!(metrics.total_downloads, 0);
        assert_eq!(metrics.package_url, None);
    }
}
