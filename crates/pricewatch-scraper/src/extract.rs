//! Applies a source's [`ExtractionRule`] to a fetched HTML body.

use pricewatch_core::ExtractionRule;

use crate::error::ExtractError;
use crate::html::HtmlQuery;
use crate::types::Item;

/// Extract up to `rule.max_items` items from `html`.
///
/// Each selector pair is evaluated in order and its items appended. Within a
/// pair, name and price matches are paired by index; when the counts differ
/// the longer list is truncated to the shorter one. A pair without a name
/// selector yields price-only items. Items whose price text is blank are
/// skipped.
///
/// # Errors
///
/// Returns [`ExtractError`] if a selector cannot be parsed.
pub fn extract_items<Q>(
    html_query: &Q,
    rule: &ExtractionRule,
    html: &str,
) -> Result<Vec<Item>, ExtractError>
where
    Q: HtmlQuery + ?Sized,
{
    let mut items = Vec::new();

    for pair in &rule.pairs {
        if items.len() >= rule.max_items {
            break;
        }

        let prices = html_query.select_text(html, &pair.price)?;
        let pair_items: Vec<Item> = match &pair.name {
            Some(name_selector) => {
                let names = html_query.select_text(html, name_selector)?;
                if names.len() != prices.len() {
                    tracing::debug!(
                        name_selector = %name_selector,
                        price_selector = %pair.price,
                        names = names.len(),
                        prices = prices.len(),
                        "name/price match counts differ; dropping unpaired matches"
                    );
                }
                names
                    .iter()
                    .zip(prices.iter())
                    .map(|(name, price)| Item {
                        name: Some(clean_text(name)).filter(|n| !n.is_empty()),
                        price: clean_text(price),
                    })
                    .collect()
            }
            None => prices
                .iter()
                .map(|price| Item {
                    name: None,
                    price: clean_text(price),
                })
                .collect(),
        };

        items.extend(pair_items.into_iter().filter(|item| !item.price.is_empty()));
    }

    items.truncate(rule.max_items);
    Ok(items)
}

/// Trim and collapse runs of whitespace to single spaces.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
