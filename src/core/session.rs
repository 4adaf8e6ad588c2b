//! Session state shared by the selector and the chat loop.
//!
//! The session is constructed once at startup and passed down explicitly;
//! nothing here lives in module-level state.

use tokio_util::sync::CancellationToken;

use crate::api::ChatMessage;
use crate::core::chat_stream::StreamParams;
use crate::core::config::Config;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct Session {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
}

impl Session {
    /// Resolves credentials from the environment first, then the settings
    /// file. A missing API key is not an error here; the endpoint rejects
    /// the first request and that surfaces as a recoverable stream error.
    pub fn new(config: &Config) -> Self {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    fn resolve(config: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = env("OPENAI_API_KEY")
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();
        let base_url = env("OPENAI_BASE_URL")
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Session {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Bundles everything a streamed completion request needs. Each request
    /// is historyless: it carries exactly one user message.
    pub fn stream_params(
        &self,
        model: &str,
        user_text: String,
        cancel_token: CancellationToken,
    ) -> StreamParams {
        StreamParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: model.to_string(),
            messages: vec![ChatMessage::user(user_text)],
            cancel_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let session = Session::resolve(&Config::default(), no_env);
        assert_eq!(session.base_url, DEFAULT_BASE_URL);
        assert!(session.api_key.is_empty());
    }

    #[test]
    fn settings_file_fills_in_missing_env() {
        let config = Config {
            api_key: Some("sk-file".to_string()),
            base_url: Some("https://file.invalid/v1".to_string()),
        };
        let session = Session::resolve(&config, no_env);
        assert_eq!(session.api_key, "sk-file");
        assert_eq!(session.base_url, "https://file.invalid/v1");
    }

    #[test]
    fn environment_overrides_settings_file() {
        let config = Config {
            api_key: Some("sk-file".to_string()),
            base_url: Some("https://file.invalid/v1".to_string()),
        };
        let session = Session::resolve(&config, |key| match key {
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            "OPENAI_BASE_URL" => Some("https://env.invalid/v1".to_string()),
            _ => None,
        });
        assert_eq!(session.api_key, "sk-env");
        assert_eq!(session.base_url, "https://env.invalid/v1");
    }

    #[test]
    fn stream_params_carry_a_single_user_message() {
        let session = Session::resolve(&Config::default(), no_env);
        let params = session.stream_params(
            "gpt-4o",
            "hello there".to_string(),
            CancellationToken::new(),
        );
        assert_eq!(params.model, "gpt-4o");
        assert_eq!(params.messages.len(), 1);
        assert_eq!(params.messages[0].role, "user");
        assert_eq!(params.messages[0].content, "hello there");
    }
}
