//! Log output for the card proxy.
//!
//! Events worth knowing about when reading the logs:
//! - `request` spans opened by the request ID middleware, carrying
//!   `request_id`, `method` and `uri`
//! - `picked card page` debug events from the selector with `language`,
//!   `count` and `page`, and the `calling LingQ` events with the upstream `url`
//! - warnings from the LingQ client when upstream answers with a non-2xx `status`
//! - errors from the API error mapping, which carry the upstream cause

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is not set.
///
/// Development shows the selector's per-page events and every upstream URL.
/// Production keeps request spans and upstream failures but not the page picks.
fn default_directives(env: &Environment) -> &'static str {
    if env.is_development() {
        "info,lcp_api=debug,lcp_lingq=debug,tower_http=debug,hyper_util=info,reqwest=info"
    } else {
        "info,lcp_api=info,lcp_lingq=info,tower_http=info,hyper_util=warn,reqwest=warn"
    }
}

/// Install the global subscriber.
///
/// Development logs are pretty-printed with file and line. Production logs are
/// one JSON object per line, with the enclosing `request` span flattened in so
/// each line can be matched to its `x-request-id`. `RUST_LOG` overrides the
/// default filter, e.g. `RUST_LOG=lcp_lingq=trace`.
pub fn init_tracing(env: &Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(env_filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .init();
    }

    tracing::info!(environment = ?env, "logging initialized");
}
