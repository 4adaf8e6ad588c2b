//! Wire payloads for the OpenAI-compatible chat-completions endpoint.

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        ChatMessage {
            role: ROLE_USER.to_string(),
            content,
        }
    }
}

#[derive(Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct ChatResponseDelta {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponseChoice {
    pub delta: ChatResponseDelta,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatResponseChoice>,
}

/// Joins a base URL and an endpoint path without producing double slashes,
/// whatever mix of trailing/leading slashes the inputs carry.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_tolerates_slash_variants() {
        let expected = "https://api.example.com/v1/chat/completions";
        assert_eq!(
            endpoint_url("https://api.example.com/v1", "chat/completions"),
            expected
        );
        assert_eq!(
            endpoint_url("https://api.example.com/v1/", "chat/completions"),
            expected
        );
        assert_eq!(
            endpoint_url("https://api.example.com/v1", "/chat/completions"),
            expected
        );
        assert_eq!(
            endpoint_url("https://api.example.com/v1///", "//chat/completions"),
            expected
        );
    }

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::user("hello".to_string())],
            stream: true,
        };

        let value = serde_json::to_value(&request).expect("serializable request");
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["stream"], true);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn chat_response_delta_content_is_optional() {
        let with_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(
            with_content.choices[0].delta.content.as_deref(),
            Some("Hi")
        );

        let without_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert!(without_content.choices[0].delta.content.is_none());
    }
}
