use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{authorization_header, percent_encode};
use crate::config::TwitterConfig;

/// Maximum attempts for transient errors.
const MAX_RETRIES: u32 = 3;

/// Base backoff delay for retries (doubles each attempt).
const BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Somewhere to send announcement text.
#[allow(async_fn_in_trait)]
pub trait Publisher {
    async fn publish(&self, text: &str) -> Result<()>;
}

/// Account details returned by `verify_credentials`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub id_str: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

/// Check if an error message indicates a transient/retryable failure.
pub fn is_transient_error(err_str: &str) -> bool {
    let lower = err_str.to_lowercase();
    lower.contains("http 429")
        || lower.contains("too many requests")
        || lower.contains("http 500")
        || lower.contains("http 502")
        || lower.contains("http 503")
        || lower.contains("http 504")
        || lower.contains("service unavailable")
        || lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection")
}

/// Run `op` with exponential backoff on transient errors.
pub async fn with_retry<T, F, Fut>(label: &str, base_backoff: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err: Option<anyhow::Error> = None;

    for attempt in 0..MAX_RETRIES {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let err_str = format!("{e:#}");
                if is_transient_error(&err_str) && attempt + 1 < MAX_RETRIES {
                    let delay = base_backoff * 2u32.pow(attempt);
                    warn!(
                        "Transient error during {label} (attempt {}/{}): {err_str}, retrying in {:?}",
                        attempt + 1,
                        MAX_RETRIES,
                        delay,
                    );
                    tokio::time::sleep(delay).await;
                    last_err = Some(e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("{label}: retry exhausted")))
}

/// Twitter/X API client signing requests with OAuth 1.0a user context.
pub struct TwitterClient {
    http: reqwest::Client,
    base: Url,
    creds: TwitterConfig,
}

impl TwitterClient {
    pub fn new(base_url: &str, creds: TwitterConfig, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, base, creds })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid endpoint path {path}"))
    }

    async fn send(&self, req: reqwest::RequestBuilder, url: &Url) -> Result<reqwest::Response> {
        let resp = req
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "{url} returned HTTP {} {}: {body}",
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            );
        }
        Ok(resp)
    }

    /// Post a tweet, returning its ID.
    pub async fn create_tweet(&self, text: &str) -> Result<String> {
        let url = self.endpoint("/2/tweets")?;
        // JSON bodies are not part of the OAuth signature.
        let auth = authorization_header(&self.creds, "POST", url.as_str(), &[]);
        let req = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, auth)
            .json(&json!({ "text": text }));
        let resp: CreateTweetResponse = self
            .send(req, &url)
            .await?
            .json()
            .await
            .context("failed to decode create tweet response")?;
        debug!("Created tweet {}", resp.data.id);
        Ok(resp.data.id)
    }

    /// Set the account profile's location field.
    pub async fn update_profile_location(&self, location: &str) -> Result<()> {
        let url = self.endpoint("/1.1/account/update_profile.json")?;
        let params = [("location", location)];
        let auth = authorization_header(&self.creds, "POST", url.as_str(), &params);
        let req = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_body(&params));
        self.send(req, &url).await?;
        Ok(())
    }

    /// Fetch the authenticated account, failing if the credentials are rejected.
    pub async fn verify_credentials(&self) -> Result<AccountInfo> {
        let url = self.endpoint("/1.1/account/verify_credentials.json")?;
        let auth = authorization_header(&self.creds, "GET", url.as_str(), &[]);
        let req = self.http.get(url.clone()).header(AUTHORIZATION, auth);
        self.send(req, &url)
            .await?
            .json()
            .await
            .context("failed to decode verify_credentials response")
    }
}

impl Publisher for TwitterClient {
    async fn publish(&self, text: &str) -> Result<()> {
        with_retry("create tweet", BASE_BACKOFF, || self.create_tweet(text)).await?;
        Ok(())
    }
}

/// `application/x-www-form-urlencoded` body using OAuth percent-encoding, so
/// the body matches the signed parameters byte for byte.
pub fn form_body(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
