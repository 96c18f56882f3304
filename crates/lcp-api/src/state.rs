use std::sync::Arc;

use lcp_lingq::{ClockSeededPicker, IndexPicker, LingqClient, RandomCardSelector};

use crate::ApiConfig;

#[derive(Clone, Debug)]
pub struct ApiState {
    pub lingq: LingqClient,
    pub cards: RandomCardSelector<LingqClient>,
}

impl ApiState {
    /// Build the state with a picker seeded from the clock at startup.
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        Self::with_picker(config, Arc::new(ClockSeededPicker::new()))
    }

    pub fn with_picker(config: &ApiConfig, picker: Arc<dyn IndexPicker>) -> anyhow::Result<Self> {
        let lingq = LingqClient::new(
            &config.lingq_api_url,
            config.lingq_api_key.as_str(),
            config.upstream_timeout(),
        )?;

        // Both calls of a card selection share the same deadline as a single call
        let cards = RandomCardSelector::new(lingq.clone(), picker, config.upstream_timeout());

        tracing::info!(
            upstream = %config.lingq_api_url,
            timeout_secs = config.upstream_timeout_secs,
            "LingQ client configured"
        );

        Ok(Self { lingq, cards })
    }
}
