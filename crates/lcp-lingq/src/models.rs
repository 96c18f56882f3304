//! LingQ wire models and the decoding of raw upstream bodies into them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::UpstreamError;

/// A language supported by LingQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Display name, e.g. `Spanish`
    pub title: String,
    /// LingQ language code, e.g. `es`
    pub code: String,
}

/// A hint attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    #[serde(default)]
    pub text: String,
}

/// A vocabulary card, reshaped for the browser client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub term: String,
    /// Upstream order is preserved. Missing or `null` upstream hints become empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hints: Vec<Hint>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct CountEnvelope {
    count: u64,
}

#[derive(Deserialize)]
struct CardPage {
    results: Vec<Card>,
}

/// Read the total card count out of a card-listing page.
pub fn decode_card_count(body: &[u8]) -> Result<u64, UpstreamError> {
    let envelope: CountEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.count)
}

/// Decode the single card held in the `results` array of a card-listing page.
pub fn decode_card(body: &[u8]) -> Result<Card, UpstreamError> {
    let page: CardPage = serde_json::from_slice(body)?;
    page.results
        .into_iter()
        .next()
        .ok_or(UpstreamError::EmptyPage)
}

/// Decode the top-level language array. Fields other than `title` and `code` are dropped.
pub fn decode_languages(body: &[u8]) -> Result<Vec<Language>, UpstreamError> {
    Ok(serde_json::from_slice(body)?)
}
