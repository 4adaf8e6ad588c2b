//! Streamed completion requests.
//!
//! A request runs on its own task and reports back over an unbounded
//! channel. The consumer sees an ordered sequence of [`StreamMessage`]s:
//! zero or more `Chunk`s, possibly one `Error`, and finally `End`.

use futures_util::StreamExt;
use memchr::memchr;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{endpoint_url, ChatMessage, ChatRequest, ChatResponse};

#[derive(Clone, Debug)]
pub enum StreamMessage {
    Chunk(String),
    Error(String),
    End,
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub cancel_token: CancellationToken,
}

#[derive(Clone)]
pub struct ChatStreamService {
    tx: mpsc::UnboundedSender<StreamMessage>,
}

impl ChatStreamService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StreamMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_stream(&self, params: StreamParams) {
        let tx = self.tx.clone();
        let cancel_token = params.cancel_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = run_stream(params, tx) => {}
                _ = cancel_token.cancelled() => {}
            }
        });
    }
}

async fn run_stream(params: StreamParams, tx: mpsc::UnboundedSender<StreamMessage>) {
    let StreamParams {
        client,
        base_url,
        api_key,
        model,
        messages,
        cancel_token,
    } = params;

    debug!(%model, "starting completion stream");
    let request = ChatRequest {
        model,
        messages,
        stream: true,
    };

    let response = client
        .post(endpoint_url(&base_url, "chat/completions"))
        .header("Content-Type", "application/json")
        .bearer_auth(&api_key)
        .json(&request)
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            report_error(&tx, &e.to_string());
            return;
        }
    };

    if !response.status().is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        report_error(&tx, &body);
        return;
    }

    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = stream.next().await {
        if cancel_token.is_cancelled() {
            return;
        }

        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                report_error(&tx, &e.to_string());
                return;
            }
        };
        buffer.extend_from_slice(&bytes);

        while let Some(newline_pos) = memchr(b'\n', &buffer) {
            let line = String::from_utf8_lossy(&buffer[..newline_pos])
                .trim()
                .to_string();
            let finished = process_sse_line(&line, &tx);
            buffer.drain(..=newline_pos);
            if finished {
                return;
            }
        }
    }

    // Stream closed without a [DONE] marker; treat it as a normal end.
    let _ = tx.send(StreamMessage::End);
}

fn report_error(tx: &mpsc::UnboundedSender<StreamMessage>, raw: &str) {
    let _ = tx.send(StreamMessage::Error(format_api_error(raw)));
    let _ = tx.send(StreamMessage::End);
}

/// Handles one SSE line. Returns true once the stream is finished, either
/// by the `[DONE]` sentinel or by an in-band error payload.
fn process_sse_line(line: &str, tx: &mpsc::UnboundedSender<StreamMessage>) -> bool {
    let Some(payload) = line.strip_prefix("data:").map(str::trim_start) else {
        return false;
    };

    if payload == "[DONE]" {
        let _ = tx.send(StreamMessage::End);
        return true;
    }

    match serde_json::from_str::<ChatResponse>(payload) {
        Ok(response) => {
            if let Some(content) = response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
            {
                let _ = tx.send(StreamMessage::Chunk(content));
            }
            false
        }
        Err(_) => {
            if payload.trim().is_empty() {
                return false;
            }
            report_error(tx, payload);
            true
        }
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                serde_json::Value::Object(map) => map
                    .get("message")
                    .and_then(|message| message.as_str().map(str::to_owned)),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.trim().to_string()
    })
}

pub fn format_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();

    if trimmed.is_empty() {
        return "API Error:\n```\n<empty>\n```".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Ok(pretty_json) = serde_json::to_string_pretty(&json_value) {
            if let Some(summary) = extract_error_summary(&json_value) {
                if !summary.is_empty() {
                    return format!("API Error: {}\n```json\n{}\n```", summary, pretty_json);
                }
            }
            return format!("API Error:\n```json\n{}\n```", pretty_json);
        }
    }

    if trimmed.starts_with('<') && trimmed.ends_with('>') {
        format!("API Error:\n```xml\n{}\n```", trimmed)
    } else {
        format!("API Error:\n```\n{}\n```", trimmed)
    }
}
