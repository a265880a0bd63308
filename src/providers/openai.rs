use reqwest::RequestBuilder;
use serde_json::{json, Value};

use super::adapter::{ChatMessage, ShapingStrategy};
use super::registry::{self, Provider};

// Shared by OpenAI and the vendors that speak its chat-completions shape
// (Groq, OpenRouter, Deepseek, Hyperbolic, Mistral, Perplexity).
pub struct OpenAiStrategy;

const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

impl ShapingStrategy for OpenAiStrategy {
  fn apply_auth(&self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
    request.bearer_auth(api_key)
  }

  fn build_body(&self, provider: Provider, messages: &[ChatMessage]) -> Value {
    let model = registry::default_model(provider).unwrap_or(FALLBACK_MODEL);
    json!({
      "model": model,
      "messages": messages,
      "temperature": 0.7,
      "max_tokens": 2048
    })
  }

  fn extract_text(&self, payload: &Value) -> Option<String> {
    payload
      .pointer("/choices/0/message/content")
      .and_then(Value::as_str)
      .map(str::to_string)
  }
}
