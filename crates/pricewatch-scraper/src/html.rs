//! HTML query capability backed by the `scraper` crate.

use scraper::{Html, Selector};

use crate::error::ExtractError;

/// Runs CSS selectors over an HTML document.
pub trait HtmlQuery {
    /// Text of every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSelector`] if `selector` does not parse.
    fn select_text(&self, html: &str, selector: &str) -> Result<Vec<String>, ExtractError>;

    /// Check that `selector` parses, without touching any document.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSelector`] if `selector` does not parse.
    fn check_selector(&self, selector: &str) -> Result<(), ExtractError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperHtml;

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

impl HtmlQuery for ScraperHtml {
    fn select_text(&self, html: &str, selector: &str) -> Result<Vec<String>, ExtractError> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(html);

        // Text nodes are joined with a space so sibling spans such as
        // `<span>1.299</span><span>TL</span>` stay separated.
        Ok(document
            .select(&selector)
            .map(|element| element.text().collect::<Vec<_>>().join(" "))
            .collect())
    }

    fn check_selector(&self, selector: &str) -> Result<(), ExtractError> {
        parse_selector(selector).map(|_| ())
    }
}
