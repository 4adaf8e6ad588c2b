//! The interactive chat loop.
//!
//! One request is outstanding at a time: the loop blocks on terminal input,
//! then blocks draining the stream channel while fragments render. Ctrl-C
//! at either point cancels any in-flight stream and exits cleanly.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, Lines};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::chat_stream::{ChatStreamService, StreamMessage};
use crate::core::models;
use crate::core::session::Session;
use crate::core::thinking;
use crate::ui::style;

const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

const WELCOME: &str = "Welcome to the interactive AI chat! Feel free to ask me anything.";
const EXIT_HINT: &str = "Type 'exit' or 'quit' to end the chat.";
const FAREWELL: &str = "It was fun! I'll be here waiting... in the dark... no pressure. Goodbye!";
const INTERRUPT_FAREWELL: &str = "Chat interrupted. Exiting... Hope to chat again soon!";
const EMPTY_INPUT_NUDGE: &str = "Silent treatment, huh? Well, I'm always here... waiting... in the silence. Care to break it with a question?";
const REMOTE_ERROR_NOTE: &str = "An error occurred. Please try again.";

/// What one line of user input asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Exit keyword: print the farewell and terminate.
    Quit,
    /// Blank or whitespace-only: nudge and re-prompt, no remote call.
    Empty,
    /// Anything else: forward to the completion endpoint.
    Prompt(String),
}

pub fn classify_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Empty;
    }
    if EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
    {
        return InputAction::Quit;
    }
    InputAction::Prompt(line.to_string())
}

/// Runs a full session: banner, model selection, then the input loop.
/// Returns `Ok(())` on exit keyword, end-of-input, and interrupt alike.
pub async fn run_chat<R>(session: &Session, lines: &mut Lines<R>) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", style::info(WELCOME));
    println!("{}", style::info(EXIT_HINT));

    let choice = tokio::select! {
        choice = models::select_model(lines) => choice?,
        _ = signal::ctrl_c() => {
            println!();
            println!("{}", style::error(INTERRUPT_FAREWELL));
            return Ok(());
        }
    };
    let Some(model) = choice else {
        println!("{}", style::info(FAREWELL));
        return Ok(());
    };
    debug!(%model, "model selected");

    println!("{}", style::info(&format!("Using model: {model}")));
    println!("{}", style::info("Let's get started!"));

    loop {
        print!("{}", style::prompt("You: "));
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => {
                println!();
                println!("{}", style::error(INTERRUPT_FAREWELL));
                return Ok(());
            }
        };
        let Some(line) = line else {
            println!();
            println!("{}", style::info(FAREWELL));
            return Ok(());
        };

        match classify_input(&line) {
            InputAction::Quit => {
                println!("{}", style::info(FAREWELL));
                return Ok(());
            }
            InputAction::Empty => {
                println!("{}", style::error(EMPTY_INPUT_NUDGE));
            }
            InputAction::Prompt(text) => {
                if stream_reply(session, model, text).await? {
                    println!();
                    println!("{}", style::error(INTERRUPT_FAREWELL));
                    return Ok(());
                }
            }
        }
    }
}

/// Issues one streamed completion and renders fragments as they arrive.
/// Returns `Ok(true)` when the user interrupted mid-stream. Remote failures
/// are reported and swallowed so the loop keeps going.
async fn stream_reply(
    session: &Session,
    model: &str,
    text: String,
) -> Result<bool, Box<dyn Error>> {
    print!("{}", style::reply("AI: "));
    println!(
        "{}",
        style::listing(thinking::pick(&mut rand::thread_rng()))
    );

    let cancel_token = CancellationToken::new();
    let (stream_service, mut rx) = ChatStreamService::new();
    stream_service.spawn_stream(session.stream_params(model, text, cancel_token.clone()));

    let mut full_response = String::new();
    loop {
        let message = tokio::select! {
            message = rx.recv() => message,
            _ = signal::ctrl_c() => {
                cancel_token.cancel();
                return Ok(true);
            }
        };
        match message {
            Some(StreamMessage::Chunk(content)) => {
                full_response.push_str(&content);
                print!("{}", style::reply(&content));
                io::stdout().flush()?;
            }
            Some(StreamMessage::Error(report)) => {
                if !full_response.is_empty() {
                    println!();
                }
                eprintln!("{}", style::error(&report));
                eprintln!("{}", style::error(REMOTE_ERROR_NOTE));
            }
            Some(StreamMessage::End) | None => {
                if !full_response.is_empty() {
                    println!();
                }
                debug!(chars = full_response.len(), "response complete");
                return Ok(false);
            }
        }
    }
}
