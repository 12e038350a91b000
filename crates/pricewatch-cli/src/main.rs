mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricewatch_scraper::PriceSearch;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch-cli")]
#[command(about = "Search product prices across catalog sites")]
struct Cli {
    /// Path to the sources file (overrides `PRICEWATCH_SOURCES_PATH`)
    #[arg(long, global = true)]
    sources: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured source and print the price report
    Search {
        /// Product to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print every source outcome as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// List configured sources
    Sources,
    /// Read bot commands from stdin and answer on stdout
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(path) = cli.sources {
        config.sources_path = path;
    }

    let sources_file = pricewatch_core::load_sources(&config.sources_path)?;
    let sources = pricewatch_core::resolve_sources(&sources_file, &config);
    tracing::debug!(
        env = %config.env,
        sources = sources.len(),
        path = %config.sources_path.display(),
        "loaded source table"
    );

    match cli.command {
        Commands::Search { query, json } => {
            let search = PriceSearch::new(sources)?;
            let query = query.join(" ");
            if json {
                let result = search.search(&query).await;
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", search.handle_query(&query).await);
            }
        }
        Commands::Sources => {
            for source in &sources {
                println!(
                    "{:<16} {:<20} timeout={}s max_items={}",
                    source.id,
                    source.name,
                    source.timeout.as_secs(),
                    source.rule.max_items
                );
            }
        }
        Commands::Chat => {
            let search = PriceSearch::new(sources)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            chat::run_chat(&search, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
