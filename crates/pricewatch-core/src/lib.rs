//! Configuration and source-table types shared by the pricewatch crates.

mod app_config;
mod config;
mod sources;

pub use app_config::{AppConfig, Environment, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{
    load_sources, parse_sources, resolve_sources, ExtractionRule, SelectorPair, Source,
    SourceConfig, SourcesFile, QUERY_PLACEHOLDER,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation failed: {0}")]
    Validation(String),
}
