use std::path::PathBuf;

use super::*;
use crate::app_config::{Environment, DEFAULT_USER_AGENT};

const VALID_YAML: &str = r#"
sources:
  - id: trendyol
    name: Trendyol
    url_template: "https://www.trendyol.com/sr?q={query}"
    selectors:
      - name: ".prdct-desc-cntnr-name"
        price: ".prc-box-dscntd"
  - id: n11
    name: n11
    url_template: "https://www.n11.com/arama?q={query}"
    headers:
      User-Agent: "custom-agent/1.0"
      Accept-Language: "tr-TR"
    timeout_secs: 4
    max_items: 5
    selectors:
      - price: ".newPrice ins"
"#;

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        sources_path: PathBuf::from("./config/sources.yaml"),
        request_timeout_secs: 10,
        user_agent: DEFAULT_USER_AGENT.to_string(),
        max_items: 3,
    }
}

fn expect_validation_error(yaml: &str, needle: &str) {
    let result = parse_sources(yaml);
    match result {
        Err(ConfigError::Validation(msg)) => assert!(
            msg.contains(needle),
            "expected validation message containing {needle:?}, got: {msg}"
        ),
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[test]
fn parses_valid_sources_in_file_order() {
    let file = parse_sources(VALID_YAML).unwrap();
    let ids: Vec<&str> = file.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["trendyol", "n11"]);
    assert_eq!(
        file.sources[0].selectors[0].name.as_deref(),
        Some(".prdct-desc-cntnr-name")
    );
    assert!(file.sources[1].selectors[0].name.is_none());
}

#[test]
fn resolve_applies_defaults() {
    let file = parse_sources(VALID_YAML).unwrap();
    let sources = resolve_sources(&file, &test_config());

    let trendyol = &sources[0];
    assert_eq!(trendyol.timeout, Duration::from_secs(10));
    assert_eq!(trendyol.rule.max_items, 3);
    assert_eq!(
        trendyol.headers,
        vec![("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string())]
    );
}

#[test]
fn resolve_keeps_per_source_overrides() {
    let file = parse_sources(VALID_YAML).unwrap();
    let sources = resolve_sources(&file, &test_config());

    let n11 = &sources[1];
    assert_eq!(n11.timeout, Duration::from_secs(4));
    assert_eq!(n11.rule.max_items, 5);
    assert_eq!(n11.headers.len(), 2, "custom UA must not be duplicated");
    assert!(n11
        .headers
        .iter()
        .any(|(k, v)| k == "User-Agent" && v == "custom-agent/1.0"));
}

#[test]
fn rejects_empty_source_list() {
    expect_validation_error("sources: []", "at least one source");
}

#[test]
fn rejects_duplicate_ids_case_insensitively() {
    let yaml = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/?q={query}"
    selectors: [{ price: ".p" }]
  - id: SHOP
    name: Shop Again
    url_template: "https://b.example/?q={query}"
    selectors: [{ price: ".p" }]
"#;
    expect_validation_error(yaml, "duplicate source id");
}

#[test]
fn rejects_template_without_placeholder() {
    let yaml = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/search"
    selectors: [{ price: ".p" }]
"#;
    expect_validation_error(yaml, "placeholder");
}

#[test]
fn rejects_non_http_template() {
    let yaml = r#"
sources:
  - id: shop
    name: Shop
    url_template: "ftp://a.example/?q={query}"
    selectors: [{ price: ".p" }]
"#;
    expect_validation_error(yaml, "http://");
}

#[test]
fn rejects_missing_selectors() {
    let yaml = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/?q={query}"
    selectors: []
"#;
    expect_validation_error(yaml, "at least one selector pair");
}

#[test]
fn rejects_blank_price_selector() {
    let yaml = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/?q={query}"
    selectors: [{ name: ".n", price: "  " }]
"#;
    expect_validation_error(yaml, "empty selector");
}

#[test]
fn rejects_zero_timeout_and_zero_cap() {
    let zero_timeout = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/?q={query}"
    timeout_secs: 0
    selectors: [{ price: ".p" }]
"#;
    expect_validation_error(zero_timeout, "timeout_secs");

    let zero_cap = r#"
sources:
  - id: shop
    name: Shop
    url_template: "https://a.example/?q={query}"
    max_items: 0
    selectors: [{ price: ".p" }]
"#;
    expect_validation_error(zero_cap, "max_items");
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let result = parse_sources("sources: [ {id: ");
    assert!(
        matches!(result, Err(ConfigError::SourcesFileParse(_))),
        "expected SourcesFileParse, got: {result:?}"
    );
}

#[test]
fn load_sources_reports_missing_file() {
    let result = load_sources(std::path::Path::new("/nonexistent/pricewatch/sources.yaml"));
    assert!(
        matches!(result, Err(ConfigError::SourcesFileIo { .. })),
        "expected SourcesFileIo, got: {result:?}"
    );
}

#[test]
fn bundled_sources_file_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/sources.yaml");
    let file = load_sources(&path).unwrap();
    assert!(!file.sources.is_empty());
}
