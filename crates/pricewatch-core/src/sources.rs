use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Substitution point for the URL-encoded query inside `url_template`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// One `(name, price)` selector pair of an extraction rule.
///
/// `name` is optional: a pair without it yields price-only items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPair {
    #[serde(default)]
    pub name: Option<String>,
    pub price: String,
}

/// A source entry as written in `sources.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub name: String,
    pub url_template: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_items: Option<usize>,
    pub selectors: Vec<SelectorPair>,
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

/// How to pull items out of one source's HTML: selector pairs in priority
/// order and the number of leading items to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub pairs: Vec<SelectorPair>,
    pub max_items: usize,
}

/// A fully resolved source: defaults from [`AppConfig`] applied.
#[derive(Debug, Clone)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url_template: String,
    pub headers: Vec<(String, String)>,
    pub rule: ExtractionRule,
    pub timeout: Duration,
}

/// Load and validate the source table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(&content)
}

/// Parse and validate a source table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile = serde_yaml::from_str(content)?;
    validate_sources(&sources_file)?;
    Ok(sources_file)
}

/// Apply `AppConfig` defaults to every configured source, preserving order.
///
/// A default `User-Agent` header is added to sources that do not set one.
#[must_use]
pub fn resolve_sources(sources_file: &SourcesFile, config: &AppConfig) -> Vec<Source> {
    sources_file
        .sources
        .iter()
        .map(|s| {
            let mut headers: Vec<(String, String)> = s
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if !headers
                .iter()
                .any(|(k, _)| k.eq_ignore_ascii_case("user-agent"))
            {
                headers.push(("User-Agent".to_string(), config.user_agent.clone()));
            }

            Source {
                id: s.id.clone(),
                name: s.name.clone(),
                url_template: s.url_template.clone(),
                headers,
                rule: ExtractionRule {
                    pairs: s.selectors.clone(),
                    max_items: s.max_items.unwrap_or(config.max_items),
                },
                timeout: Duration::from_secs(
                    s.timeout_secs.unwrap_or(config.request_timeout_secs),
                ),
            }
        })
        .collect()
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for source in &sources_file.sources {
        if source.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(source.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source id: '{}'",
                source.id
            )));
        }

        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty name",
                source.id
            )));
        }

        let template = source.url_template.as_str();
        if !(template.starts_with("https://") || template.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "source '{}' url_template must start with http:// or https://",
                source.id
            )));
        }
        if !template.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "source '{}' url_template is missing the {QUERY_PLACEHOLDER} placeholder",
                source.id
            )));
        }

        if source.selectors.is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' must define at least one selector pair",
                source.id
            )));
        }
        for pair in &source.selectors {
            let blank_name = pair.name.as_deref().is_some_and(|n| n.trim().is_empty());
            if pair.price.trim().is_empty() || blank_name {
                return Err(ConfigError::Validation(format!(
                    "source '{}' has an empty selector",
                    source.id
                )));
            }
        }

        if source.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(format!(
                "source '{}' timeout_secs must be greater than zero",
                source.id
            )));
        }
        if source.max_items == Some(0) {
            return Err(ConfigError::Validation(format!(
                "source '{}' max_items must be greater than zero",
                source.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
