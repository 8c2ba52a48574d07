use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use modelmuse::{
    connector::tui, DescribeModelUseCase, GeminiClient, MockGenerator, Settings, TextGenerator,
};

/// Canned description served by `--mock-generator`.
const MOCK_DESCRIPTION: &str = "A matte ceramic teapot with a softly rounded body, a woven \
     bamboo handle, and a celadon glaze that pools into pale green in the grooves. Low-poly \
     in silhouette but smooth-shaded, in a calm Japanese studio style.";

#[derive(Parser)]
#[command(name = "modelmuse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    /// Use a canned generator instead of the Gemini API (no key required)
    #[arg(long)]
    mock_generator: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Logs go to a file: stdout belongs to the terminal UI.
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "modelmuse.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let generator: Option<Arc<dyn TextGenerator>> = if cli.mock_generator {
        info!("Using mock text generator");
        Some(Arc::new(MockGenerator::with_reply(MOCK_DESCRIPTION)))
    } else {
        // The single authoritative credential check for the session. On
        // failure the front-end still runs, permanently disabled.
        match Settings::from_env() {
            Ok(settings) => {
                info!(
                    "Using Gemini model {} at {}",
                    settings.model(),
                    settings.base_url()
                );
                Some(Arc::new(GeminiClient::new(
                    settings.api_key(),
                    settings.model(),
                    settings.base_url(),
                )))
            }
            Err(e) => {
                warn!("{e}. Search is disabled for this session.");
                None
            }
        }
    };

    let handler = Arc::new(DescribeModelUseCase::new(generator));
    tui::run(handler).await?;

    Ok(())
}
