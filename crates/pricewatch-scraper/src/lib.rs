//! Concurrent multi-source price search.
//!
//! Fetches every configured catalog page for a query in parallel, extracts
//! name/price pairs with per-source CSS selectors, and renders one report.

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod html;
pub mod http;
pub mod search;
pub mod types;

#[cfg(test)]
mod test_support;

pub use aggregate::aggregate;
pub use error::{ExtractError, FetchError, ScraperError};
pub use fetch::{build_url, fetch_source};
pub use format::{format_report, NOT_FOUND_MESSAGE};
pub use html::{HtmlQuery, ScraperHtml};
pub use http::{HttpConnect, HttpFetch, HttpResponse, ReqwestConnector, ReqwestFetch};
pub use search::{PriceSearch, USAGE_MESSAGE};
pub use types::{AggregateResult, FailureKind, Item, SourceOutcome, SourceResult};
