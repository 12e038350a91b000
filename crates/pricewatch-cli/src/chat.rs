//! Line-oriented bot front end.
//!
//! Reads one command per line and writes each reply as a message block.
//! Understands the same commands as the chat bot: `/start`, `/help`
//! (`/yardim`), and `/search <product>` (`/ara`).

use pricewatch_scraper::{HtmlQuery, HttpConnect, PriceSearch, USAGE_MESSAGE};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub(crate) const WELCOME_MESSAGE: &str = "Hello! I am the price tracking bot. 🤖\n\
Commands:\n\
/search [product name] - search product prices\n\
/help - show the help menu";

pub(crate) const HELP_MESSAGE: &str = "🔍 Commands:\n\n\
/search [product name] - search product prices\n\
/help - show this menu\n\n\
📝 Example:\n\
/search ironing board";

pub(crate) const UNKNOWN_MESSAGE: &str = "Unknown command. Send /help for the command list.";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ChatCommand {
    Start,
    Help,
    Search(String),
    Unknown,
}

/// Parse one input line. Blank lines yield `None`.
pub(crate) fn parse_command(line: &str) -> Option<ChatCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    // `/search@pricebot` addresses a specific bot in group chats.
    let head = head.split('@').next().unwrap_or(head);

    let command = match head {
        "/start" => ChatCommand::Start,
        "/help" | "/yardim" => ChatCommand::Help,
        "/search" | "/ara" => {
            ChatCommand::Search(rest.split_whitespace().collect::<Vec<_>>().join(" "))
        }
        _ => ChatCommand::Unknown,
    };
    Some(command)
}

/// Answer commands from `input` until EOF.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing a reply fails.
pub(crate) async fn run_chat<C, Q, R, W>(
    search: &PriceSearch<C, Q>,
    input: R,
    output: &mut W,
) -> std::io::Result<()>
where
    C: HttpConnect,
    Q: HtmlQuery,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            ChatCommand::Start => send(output, WELCOME_MESSAGE).await?,
            ChatCommand::Help => send(output, HELP_MESSAGE).await?,
            ChatCommand::Search(product) if product.is_empty() => {
                send(output, USAGE_MESSAGE).await?;
            }
            ChatCommand::Search(product) => {
                tracing::info!(product = %product, "search requested");
                send(output, &format!("🔍 Searching for {product}...")).await?;
                let report = search.handle_query(&product).await;
                send(output, &report).await?;
            }
            ChatCommand::Unknown => send(output, UNKNOWN_MESSAGE).await?,
        }
    }

    Ok(())
}

async fn send<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.trim_end().as_bytes()).await?;
    output.write_all(b"\n\n").await?;
    output.flush().await
}
