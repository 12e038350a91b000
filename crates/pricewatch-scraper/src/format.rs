//! Renders an [`AggregateResult`] as the user-facing report.

use std::fmt::Write as _;

use crate::types::{AggregateResult, Item};

/// Whole report when no source produced a single item.
pub const NOT_FOUND_MESSAGE: &str = "❌ No prices found for this product.";

/// Render the report for one query.
///
/// Sources are listed in configuration order; only sources with at least one
/// item get a section. Empty and failed sources are left out entirely. When
/// no source has items the report is exactly [`NOT_FOUND_MESSAGE`].
#[must_use]
pub fn format_report(result: &AggregateResult) -> String {
    if !result.has_items() {
        return NOT_FOUND_MESSAGE.to_owned();
    }

    let mut report = format!("📊 Prices found for {}:\n", result.query);

    for entry in &result.results {
        let items = entry.outcome.items();
        if items.is_empty() {
            continue;
        }

        let _ = write!(report, "\n{}\n", entry.source_name);
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(report, "{}. {}", i + 1, item_line(item));
        }
    }

    report
}

fn item_line(item: &Item) -> String {
    match &item.name {
        Some(name) => format!("{name}: {}", item.price),
        None => item.price.clone(),
    }
}
