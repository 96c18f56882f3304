use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to LingQ.
///
/// The HTTP layer collapses all of these into a single "connection failed"
/// response; the variants exist so the cause can be logged.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to LingQ failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LingQ responded with status {0}")]
    Status(StatusCode),
    #[error("unexpected LingQ payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("LingQ card page contained no results")]
    EmptyPage,
    #[error("LingQ did not answer within {0:?}")]
    Timeout(Duration),
    #[error("invalid LingQ base URL: {0}")]
    InvalidBaseUrl(String),
}
