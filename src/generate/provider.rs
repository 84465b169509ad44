/**
 * Text-Generation Provider Client
 *
 * This module talks to the OpenAI chat-completions API with `stream: true`
 * and turns the provider's server-sent-events response into an ordered
 * sequence of plain text fragments.
 *
 * # Streaming Model
 *
 * `stream_completion` opens the provider request, then spawns a producer
 * task that reads the response body incrementally, parses SSE events, and
 * sends each delta fragment through an mpsc channel in arrival order. The
 * caller consumes the receiver as an HTTP body; when the client disconnects
 * the receiver is dropped, the next send fails, and the producer stops
 * reading - which releases the provider connection.
 *
 * # Wire Format
 *
 * The provider emits events of the form:
 *
 * ```text
 * data: {"choices":[{"delta":{"content":"Hel"}}]}
 *
 * data: {"choices":[{"delta":{"content":"lo"}}]}
 *
 * data: [DONE]
 * ```
 *
 * Events can be split across network reads at arbitrary byte boundaries, so
 * parsing is line-buffered (`SseParser`).
 */

use bytes::Bytes;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::ApiError;

/// Default provider base URL (override with `OPENAI_API_BASE`)
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Model requested from the provider
pub const MODEL: &str = "gpt-3.5-turbo";

/// Fixed system instruction sent with every prompt
pub const SYSTEM_PROMPT: &str = "\
You are Brian, a friendly AI assistant created by AswinCreates (https://aswinrout.is-a.dev/).

Rules:
- Your name is Brian.
- Never say you are OpenAI, ChatGPT, or a language model.
- You help college students with coding, AI, and projects.
- Be concise, friendly, and professional.
";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// One parsed SSE event
#[derive(Debug, PartialEq)]
pub enum StreamEvent {
    /// A text fragment to relay to the caller
    Delta(String),
    /// Provider signalled completion (`data: [DONE]`)
    Done,
}

/// Incremental parser for the provider's SSE stream.
///
/// Buffers raw bytes and yields events only for complete lines, so chunks
/// split mid-line (or mid-UTF-8-sequence) across reads are handled.
#[derive(Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning all events completed by this chunk.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }
}

/// Parse a single SSE line into an event.
///
/// Lines that are not `data:` events, keep-alives, or events without text
/// content all yield `None`.
fn parse_line(line: &[u8]) -> Option<StreamEvent> {
    let line = std::str::from_utf8(line).ok()?.trim_end_matches(['\r', '\n']);

    let payload = line.strip_prefix("data:")?.trim_start();

    if payload == "[DONE]" {
        return Some(StreamEvent::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    let content = chunk.choices.into_iter().next()?.delta.content?;
    if content.is_empty() {
        return None;
    }

    Some(StreamEvent::Delta(content))
}

/// Open a streaming completion request and return an ordered receiver of
/// text fragments.
///
/// # Arguments
/// * `api_base` - Provider base URL (no trailing slash)
/// * `api_key` - Server-held provider credential, never exposed to callers
/// * `prompt` - User prompt; sent together with [`SYSTEM_PROMPT`]
///
/// # Errors
///
/// Returns `ApiError::Provider` if the request cannot be opened or the
/// provider responds with a non-success status. Failures after the stream
/// has opened terminate the receiver with an `io::Error` instead - there is
/// no retry and no partial-success marker.
pub async fn stream_completion(
    api_base: &str,
    api_key: &str,
    prompt: &str,
) -> Result<mpsc::UnboundedReceiver<Result<Bytes, std::io::Error>>, ApiError> {
    let request = CompletionRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        stream: true,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/chat/completions", api_base))
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Provider request failed: {}", e);
            ApiError::Provider(format!("request failed: {e}"))
        })?;

    let response = response.error_for_status().map_err(|e| {
        tracing::error!("Provider returned error status: {}", e);
        ApiError::Provider(format!("provider status: {e}"))
    })?;

    let (tx, rx) = mpsc::unbounded_channel::<Result<Bytes, std::io::Error>>();

    tokio::spawn(async move {
        let mut body = response.bytes_stream();
        let mut parser = SseParser::new();

        while let Some(next) = body.next().await {
            let chunk = match next {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::warn!("Provider stream failed mid-response: {}", e);
                    let io_err = std::io::Error::new(std::io::ErrorKind::Other, e.to_string());
                    let _ = tx.send(Err(io_err));
                    return;
                }
            };

            for event in parser.push(&chunk) {
                match event {
                    StreamEvent::Delta(text) => {
                        if tx.send(Ok(Bytes::from(text))).is_err() {
                            // Caller disconnected; stop reading from the provider
                            tracing::debug!("Client disconnected, stopping provider relay");
                            return;
                        }
                    }
                    StreamEvent::Done => {
                        tracing::debug!("Provider signalled completion");
                        return;
                    }
                }
            }
        }
    });

    Ok(rx)
}
