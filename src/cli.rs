//! Command-line entry point.
//!
//! The interface is a plain prompt/response protocol with no flags; clap
//! still fronts the binary so `--help` and `--version` behave normally.

use std::error::Error;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::session::Session;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "A line-oriented terminal chat client using OpenAI-compatible APIs")]
#[command(
    long_about = "Parley is an interactive terminal chat client. It asks you to pick a model, \
then forwards each line you type to an OpenAI-compatible completion endpoint and streams \
the reply back as it arrives. Each request is independent; no conversation history is kept.\n\n\
Configuration:\n\
  Credentials come from the environment, falling back to the settings file\n\
  (config.toml in the platform config directory).\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    API key for the endpoint\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\n\
Controls:\n\
  Type a message and press Enter to send it\n\
  'exit' or 'quit'  End the chat\n\
  Ctrl+C            End the chat"
)]
pub struct Args {}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let _args = Args::parse();
    init_tracing();

    let config = Config::load()?;
    let session = Session::new(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    run_chat(&session, &mut lines).await
}

/// Diagnostics go to stderr and stay off unless `RUST_LOG` asks for them,
/// keeping the chat transcript on stdout clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .init();
}
