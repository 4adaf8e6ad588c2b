//! Parley is a line-oriented terminal chat client for OpenAI-compatible APIs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns configuration, the HTTP session, model selection, the
//!   cosmetic "thinking" messages, and streaming orchestration.
//! - [`ui`] renders the prompt/response exchange and runs the interactive
//!   chat loop.
//! - [`api`] defines the chat-completions payloads used by the streaming
//!   client.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`ui::chat_loop`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
