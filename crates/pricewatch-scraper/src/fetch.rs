//! Single-source fetch: build the URL, GET within the deadline, extract.

use std::time::Instant;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pricewatch_core::{Source, QUERY_PLACEHOLDER};

use crate::error::FetchError;
use crate::extract::extract_items;
use crate::html::HtmlQuery;
use crate::http::{duration_ms, HttpFetch};
use crate::types::{FailureKind, SourceOutcome};

/// Substitute the percent-encoded `query` into every placeholder of `template`.
#[must_use]
pub fn build_url(template: &str, query: &str) -> String {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
    template.replace(QUERY_PLACEHOLDER, &encoded)
}

/// Fetch one source and extract its items.
///
/// Never fails: transport errors, non-2xx statuses, timeouts, and selector
/// errors all become [`SourceOutcome::Failure`]. The whole call, including
/// reading the body, is bounded by `source.timeout`.
pub async fn fetch_source<H, Q>(
    http: &H,
    html_query: &Q,
    source: &Source,
    query: &str,
) -> SourceOutcome
where
    H: HttpFetch + ?Sized,
    Q: HtmlQuery + ?Sized,
{
    let url = build_url(&source.url_template, query);
    let started = Instant::now();

    let response = match tokio::time::timeout(
        source.timeout,
        http.get(&url, &source.headers, source.timeout),
    )
    .await
    {
        Ok(Ok(response)) => response,
        Ok(Err(FetchError::Timeout { .. })) | Err(_) => {
            return SourceOutcome::failure(
                FailureKind::Timeout,
                format!("no response within {}ms", duration_ms(source.timeout)),
            );
        }
        Ok(Err(err)) => {
            return SourceOutcome::failure(FailureKind::Transport, err.to_string());
        }
    };

    if !response.is_success() {
        return SourceOutcome::failure(
            FailureKind::Status,
            format!("unexpected HTTP status {} from {url}", response.status),
        );
    }

    let outcome = match extract_items(html_query, &source.rule, &response.body) {
        Ok(items) if items.is_empty() => SourceOutcome::Empty,
        Ok(items) => SourceOutcome::Success { items },
        Err(err) => SourceOutcome::failure(FailureKind::Extraction, err.to_string()),
    };

    tracing::debug!(
        source = %source.id,
        url = %url,
        elapsed_ms = duration_ms(started.elapsed()),
        "source fetch complete"
    );

    outcome
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
