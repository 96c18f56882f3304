//! Authenticated HTTP access to the LingQ API.

use std::{fmt, future::Future, time::Duration, time::Instant};

use metrics::{counter, histogram};
use reqwest::{Url, header::AUTHORIZATION};

use crate::{
    error::UpstreamError,
    models::{Language, decode_languages},
};

/// Source of raw card-listing pages.
///
/// One call is one GET against `/{language}/cards/` with a page size of 1, so
/// `page` addresses a single card. Implementations do not retry.
pub trait CardFetcher: Send + Sync {
    /// Fetch the raw body of card page `page` for `language`.
    fn fetch_card_page(
        &self,
        language: &str,
        page: u64,
    ) -> impl Future<Output = Result<Vec<u8>, UpstreamError>> + Send;
}

/// Client for the LingQ v2 API
#[derive(Clone)]
pub struct LingqClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for LingqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LingqClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl LingqClient {
    /// Create a client rooted at `base_url` (e.g. `https://www.lingq.com/api/v2`).
    ///
    /// `timeout` bounds every individual request.
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// URL of the language list.
    pub fn languages_url(&self) -> Url {
        self.endpoint(&["languages"])
    }

    /// URL of a single-card page for `language`.
    pub fn cards_url(&self, language: &str, page: u64) -> Url {
        let mut url = self.endpoint(&[language, "cards"]);
        url.query_pairs_mut()
            .append_pair("page_size", "1")
            .append_pair("page", &page.to_string());
        url
    }

    /// Fetch every language LingQ supports, in upstream order.
    pub async fn languages(&self) -> Result<Vec<Language>, UpstreamError> {
        let body = self.get("languages", self.languages_url(), false).await?;
        decode_languages(&body)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot-be-a-base URLs are rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    async fn get(
        &self,
        operation: &'static str,
        url: Url,
        authorize: bool,
    ) -> Result<Vec<u8>, UpstreamError> {
        let start = Instant::now();
        let result = self.send(url, authorize).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        counter!(
            "lingq_requests_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        histogram!("lingq_request_duration_seconds", "operation" => operation)
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn send(&self, url: Url, authorize: bool) -> Result<Vec<u8>, UpstreamError> {
        tracing::debug!(%url, "calling LingQ");

        let mut request = self.http.get(url.clone());
        if authorize {
            request = request.header(AUTHORIZATION, format!("Token {}", self.token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "LingQ returned an error status");
            return Err(UpstreamError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl CardFetcher for LingqClient {
    async fn fetch_card_page(&self, language: &str, page: u64) -> Result<Vec<u8>, UpstreamError> {
        self.get("cards", self.cards_url(language, page), true).await
    }
}
