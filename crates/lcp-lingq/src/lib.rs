//! LingQ upstream access for the card proxy.
//!
//! This crate owns everything that talks to LingQ: the wire models, the
//! authenticated HTTP client, and the random card selection built on top of it.
//! The HTTP surface lives in `lcp-api`.

pub mod client;
pub mod error;
pub mod models;
pub mod picker;
pub mod selector;

pub use client::{CardFetcher, LingqClient};
pub use error::UpstreamError;
pub use models::{Card, Hint, Language};
pub use picker::{ClockSeededPicker, IndexPicker};
pub use selector::{CardQueryOutcome, RandomCardSelector, SelectError};
