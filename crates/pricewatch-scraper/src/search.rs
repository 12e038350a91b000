//! Query entry point tying the fetcher, aggregator, and formatter together.

use pricewatch_core::Source;

use crate::aggregate::aggregate;
use crate::error::ScraperError;
use crate::format::format_report;
use crate::html::{HtmlQuery, ScraperHtml};
use crate::http::{HttpConnect, ReqwestConnector};
use crate::types::{AggregateResult, FailureKind, SourceOutcome, SourceResult};

/// Reply to a blank query; no requests are made.
pub const USAGE_MESSAGE: &str = "Please enter a product name. Example: /search ironing board";

/// Price search over a fixed set of sources.
///
/// Holds no per-query state: every call opens its own HTTP session, fans
/// out, and drops the session once all sources have answered.
pub struct PriceSearch<C = ReqwestConnector, Q = ScraperHtml> {
    sources: Vec<Source>,
    connector: C,
    html: Q,
}

impl PriceSearch {
    /// Build a search using `reqwest` and the `scraper` HTML engine.
    ///
    /// # Errors
    ///
    /// See [`PriceSearch::with_capabilities`].
    pub fn new(sources: Vec<Source>) -> Result<Self, ScraperError> {
        Self::with_capabilities(sources, ReqwestConnector::default(), ScraperHtml)
    }
}

impl<C, Q> PriceSearch<C, Q>
where
    C: HttpConnect,
    Q: HtmlQuery,
{
    /// Build a search from explicit HTTP and HTML capabilities.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NoSources`] if `sources` is empty.
    /// - [`ScraperError::InvalidRule`] if any selector fails to parse.
    pub fn with_capabilities(
        sources: Vec<Source>,
        connector: C,
        html: Q,
    ) -> Result<Self, ScraperError> {
        if sources.is_empty() {
            return Err(ScraperError::NoSources);
        }

        for source in &sources {
            for pair in &source.rule.pairs {
                let selectors = pair.name.iter().chain(std::iter::once(&pair.price));
                for selector in selectors {
                    html.check_selector(selector)
                        .map_err(|error| ScraperError::InvalidRule {
                            source_id: source.id.clone(),
                            error,
                        })?;
                }
            }
        }

        Ok(Self {
            sources,
            connector,
            html,
        })
    }

    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Query all sources and return every outcome.
    ///
    /// If the HTTP session cannot be opened, every source is reported as a
    /// transport failure.
    pub async fn search(&self, query: &str) -> AggregateResult {
        let query = query.trim();
        match self.connector.connect() {
            Ok(session) => aggregate(&session, &self.html, &self.sources, query).await,
            Err(err) => {
                tracing::error!(error = %err, "failed to open HTTP session");
                let reason = err.to_string();
                AggregateResult {
                    query: query.to_owned(),
                    results: self
                        .sources
                        .iter()
                        .map(|source| SourceResult {
                            source_id: source.id.clone(),
                            source_name: source.name.clone(),
                            outcome: SourceOutcome::failure(FailureKind::Transport, reason.clone()),
                        })
                        .collect(),
                }
            }
        }
    }

    /// Answer one user query with the final report text.
    ///
    /// A blank query returns [`USAGE_MESSAGE`] without touching the network.
    pub async fn handle_query(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return USAGE_MESSAGE.to_owned();
        }
        format_report(&self.search(text).await)
    }
}
