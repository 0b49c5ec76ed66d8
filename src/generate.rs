//! Synchronous client for the remote text-generation service.
//!
//! One outbound request per run: a single user-role message with a fixed
//! sampling temperature, posted to an OpenAI-compatible chat-completions
//! endpoint. Any failure here is fatal - without a reply there is nothing to
//! extract, so errors propagate to the top level and no output is written.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;

/// Chat-completions endpoint of the generation service.
const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the service API key.
const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Sampling temperature sent with every request.
const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Request a completion for `prompt` from `model`.
///
/// Returns the first choice's message content, trimmed.
pub fn request_completion(model: &str, prompt: &str) -> Result<String> {
    let api_key = env::var(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} environment variable is not set"))?;

    let request = ChatRequest {
        model,
        messages: [ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: TEMPERATURE,
    };

    let start = Instant::now();
    let mut response = ureq::post(API_URL)
        .header("Authorization", &format!("Bearer {api_key}"))
        .send_json(&request)
        .context("send generation request")?;
    let reply: ChatReply = response
        .body_mut()
        .read_json()
        .context("decode generation response")?;

    let content = reply
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("generation response contained no choices"))?;

    tracing::info!(
        model,
        elapsed_ms = start.elapsed().as_millis() as u64,
        prompt_chars = prompt.chars().count(),
        reply_chars = content.chars().count(),
        "generation request complete"
    );

    Ok(content.trim().to_string())
}
