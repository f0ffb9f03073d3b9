use std::time::Duration;

use anyhow::Context;
use log::info;
use once_cell::sync::Lazy;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, USER_AGENT,
};
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(10);

// The search pages are served to browsers; plain library user agents get
// challenged, so the request carries a browser-shaped header set.
static DEFAULT_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!(
            "Alfred Letterboxd Workflow/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#,
        ),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers
});

pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(DEFAULT_HEADERS.clone())
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetches `url` once; a non-success status is an error. No retries.
    pub async fn fetch(&self, url: Url) -> anyhow::Result<String> {
        info!("Fetching {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::USER_AGENT;

    use super::DEFAULT_HEADERS;

    #[test]
    fn user_agent_carries_the_workflow_version() {
        let ua = DEFAULT_HEADERS[USER_AGENT].to_str().unwrap();
        assert!(ua.starts_with("Alfred Letterboxd Workflow/"));
        assert!(ua.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn accepts_html() {
        assert!(DEFAULT_HEADERS["accept"].to_str().unwrap().contains("text/html"));
    }
}
