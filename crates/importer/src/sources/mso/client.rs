use reqwest::header::CACHE_CONTROL;
use tracing::debug;

use crate::error::{ImporterError, Result};

/// The site serves an error page to clients that do not look like a
/// browser, so every request carries a desktop Chrome user-agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const MSO_BASE_URL: &str = "https://www.meetscoresonline.com";

/// HTTP client for MeetScoresOnline pages. One blocking-style call per
/// page, no retries; a hung server stalls only the call at hand and the
/// caller may simply re-invoke.
pub struct MsoClient {
    base_url: String,
    client: reqwest::Client,
}

impl MsoClient {
    pub fn new() -> Self {
        Self::with_base_url(MSO_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap(),
        }
    }

    /// Fetch the athlete's results listing page.
    pub async fn fetch_listing(&self, athlete_id: &str) -> Result<String> {
        let url = format!("{}/Athlete.MyScores/{}", self.base_url, athlete_id);
        self.fetch(&url).await
    }

    /// Fetch one meet's detail page. Relative paths (the listing's link
    /// hrefs) are resolved against the site root.
    pub async fn fetch_detail(&self, url: &str) -> Result<String> {
        if let Some(path) = url.strip_prefix('/') {
            let url = format!("{}/{}", self.base_url, path);
            self.fetch(&url).await
        } else {
            self.fetch(url).await
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::Fetch {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        debug!(url, bytes = html.len(), "fetched page");
        Ok(html)
    }
}

impl Default for MsoClient {
    fn default() -> Self {
        Self::new()
    }
}
