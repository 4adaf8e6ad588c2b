pub mod chat_stream;
pub mod config;
pub mod models;
pub mod session;
pub mod thinking;
