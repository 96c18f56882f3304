//! Random card selection.
//!
//! Picking a card takes two sequential LingQ calls: the first reads the total
//! card count for the language from page 1, the second fetches the card on a
//! uniformly drawn page. LingQ pages hold a single card, so the page number
//! is the card index.

use std::{fmt, num::NonZeroU64, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    client::CardFetcher,
    error::UpstreamError,
    models::{Card, decode_card, decode_card_count},
    picker::IndexPicker,
};

/// Page requested when only the count is of interest. Every page carries it.
const COUNT_PAGE: u64 = 1;

/// Result of looking up how many cards a language has.
#[derive(Debug)]
pub enum CardQueryOutcome {
    /// LingQ could not be reached or answered with something other than a card page
    ConnectionFailed(UpstreamError),
    /// LingQ answered, but the language has no cards
    NoCardsFound,
    /// The language has this many cards
    Found(NonZeroU64),
}

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("no cards found for language '{0}'")]
    NoCards(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Resolves a language code to one randomly chosen card.
#[derive(Clone)]
pub struct RandomCardSelector<F> {
    fetcher: F,
    picker: Arc<dyn IndexPicker>,
    deadline: Duration,
}

impl<F: fmt::Debug> fmt::Debug for RandomCardSelector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomCardSelector")
            .field("fetcher", &self.fetcher)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl<F: CardFetcher> RandomCardSelector<F> {
    /// `deadline` bounds the whole count-then-fetch sequence of one selection.
    pub fn new(fetcher: F, picker: Arc<dyn IndexPicker>, deadline: Duration) -> Self {
        Self {
            fetcher,
            picker,
            deadline,
        }
    }

    /// Look up how many cards `language` has.
    pub async fn count_cards(&self, language: &str) -> CardQueryOutcome {
        let count = match self
            .fetcher
            .fetch_card_page(language, COUNT_PAGE)
            .await
            .and_then(|body| decode_card_count(&body))
        {
            Ok(count) => count,
            Err(e) => return CardQueryOutcome::ConnectionFailed(e),
        };

        match NonZeroU64::new(count) {
            Some(count) => CardQueryOutcome::Found(count),
            None => CardQueryOutcome::NoCardsFound,
        }
    }

    /// Fetch a uniformly random card for `language`.
    ///
    /// Fails with [`UpstreamError::Timeout`] if both calls together take longer
    /// than the configured deadline.
    pub async fn random_card(&self, language: &str) -> Result<Card, SelectError> {
        match tokio::time::timeout(self.deadline, self.select(language)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.deadline).into()),
        }
    }

    async fn select(&self, language: &str) -> Result<Card, SelectError> {
        let count = match self.count_cards(language).await {
            CardQueryOutcome::Found(count) => count,
            CardQueryOutcome::NoCardsFound => {
                return Err(SelectError::NoCards(language.to_string()));
            }
            CardQueryOutcome::ConnectionFailed(e) => return Err(e.into()),
        };

        let page = self.picker.pick_below(count);
        tracing::debug!(language, count = count.get(), page, "picked card page");

        let body = self.fetcher.fetch_card_page(language, page).await?;
        Ok(decode_card(&body)?)
    }
}
