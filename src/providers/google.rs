use reqwest::RequestBuilder;
use serde_json::{json, Value};

use super::adapter::{ChatMessage, Role, ShapingStrategy};
use super::registry::Provider;

pub struct GoogleStrategy;

impl ShapingStrategy for GoogleStrategy {
  fn apply_auth(&self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
    request.header("x-goog-api-key", api_key)
  }

  // The model is addressed in the URL path, not the body.
  fn build_body(&self, _provider: Provider, messages: &[ChatMessage]) -> Value {
    let contents: Vec<Value> = messages
      .iter()
      .map(|message| {
        let role = match message.role {
          Role::Assistant => "model",
          Role::User => "user",
        };
        json!({ "role": role, "parts": [{ "text": message.content }] })
      })
      .collect();

    json!({
      "contents": contents,
      "generationConfig": {
        "temperature": 0.7,
        "maxOutputTokens": 2048
      }
    })
  }

  fn extract_text(&self, payload: &Value) -> Option<String> {
    payload
      .pointer("/candidates/0/content/parts/0/text")
      .and_then(Value::as_str)
      .map(str::to_string)
  }
}
