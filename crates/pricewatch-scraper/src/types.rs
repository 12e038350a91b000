//! Per-query result types: items, per-source outcomes, and the aggregate.
//!
//! Everything here is created fresh for one query and dropped once the
//! report has been rendered.

use serde::Serialize;

/// One extracted name/price pair, kept as raw display text.
///
/// Prices are not parsed into numbers: catalog sites render them in
/// inconsistent formats (`"1.299,99 TL"`, `"₺1.299"`, `"1299 TL'den"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: Option<String>,
    pub price: String,
}

/// Why a source produced no usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection refused, DNS failure, or the body could not be read.
    Transport,
    /// The server answered with a non-2xx status.
    Status,
    /// The fetch exceeded the source's deadline.
    Timeout,
    /// A selector in the source's rule could not be applied.
    Extraction,
}

/// Terminal result of one source for one query.
///
/// `Empty` is a successful fetch whose markup matched nothing; it is not an
/// error and is kept distinct from `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    Success { items: Vec<Item> },
    Empty,
    Failure { kind: FailureKind, reason: String },
}

impl SourceOutcome {
    pub(crate) fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            reason: reason.into(),
        }
    }

    /// Items of a `Success` outcome; empty for `Empty` and `Failure`.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Success { items } => items,
            Self::Empty | Self::Failure { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// A source's outcome tagged with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceResult {
    pub source_id: String,
    pub source_name: String,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

/// All outcomes for one query, in source configuration order.
///
/// Holds exactly one entry per configured source, whatever happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub query: String,
    pub results: Vec<SourceResult>,
}

impl AggregateResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Outcome for the source with the given identifier.
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<&SourceOutcome> {
        self.results
            .iter()
            .find(|r| r.source_id == source_id)
            .map(|r| &r.outcome)
    }

    /// `true` when at least one source returned one or more items.
    #[must_use]
    pub fn has_items(&self) -> bool {
        self.results.iter().any(|r| !r.outcome.items().is_empty())
    }
}
