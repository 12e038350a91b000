//! Concurrent fan-out over all configured sources.

use futures::future::join_all;
use pricewatch_core::Source;

use crate::fetch::fetch_source;
use crate::html::HtmlQuery;
use crate::http::HttpFetch;
use crate::types::{AggregateResult, SourceOutcome, SourceResult};

/// Query every source concurrently and collect one outcome per source.
///
/// All fetches start together and are polled on the current task; each is
/// bounded by its own source timeout, so the slowest source delays the
/// result by at most its own deadline. A failing source never cancels the
/// others. Results are returned in `sources` order, not completion order.
pub async fn aggregate<H, Q>(
    http: &H,
    html_query: &Q,
    sources: &[Source],
    query: &str,
) -> AggregateResult
where
    H: HttpFetch + ?Sized,
    Q: HtmlQuery + ?Sized,
{
    let outcomes = join_all(
        sources
            .iter()
            .map(|source| fetch_source(http, html_query, source, query)),
    )
    .await;

    let results: Vec<SourceResult> = sources
        .iter()
        .zip(outcomes)
        .map(|(source, outcome)| {
            log_outcome(source, &outcome);
            SourceResult {
                source_id: source.id.clone(),
                source_name: source.name.clone(),
                outcome,
            }
        })
        .collect();

    let failed = results.iter().filter(|r| r.outcome.is_failure()).count();
    let with_items = results
        .iter()
        .filter(|r| !r.outcome.items().is_empty())
        .count();
    tracing::info!(
        query,
        sources = results.len(),
        with_items,
        failed,
        "price search complete"
    );

    AggregateResult {
        query: query.to_owned(),
        results,
    }
}

fn log_outcome(source: &Source, outcome: &SourceOutcome) {
    match outcome {
        SourceOutcome::Success { items } => {
            tracing::info!(source = %source.id, items = items.len(), "source returned items");
        }
        SourceOutcome::Empty => {
            tracing::info!(source = %source.id, "source returned no matching items");
        }
        SourceOutcome::Failure { kind, reason } => {
            tracing::warn!(
                source = %source.id,
                kind = ?kind,
                error = %reason,
                "source fetch failed"
            );
        }
    }
}
