use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::registry::{self, Provider};

pub const FALLBACK_TEXT: &str = "No response generated";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
  pub role: Role,
  pub content: String,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    Self { role: Role::User, content: content.into() }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self { role: Role::Assistant, content: content.into() }
  }
}

#[derive(Debug, Error)]
pub enum ProviderError {
  #[error("missing API key for {0}")]
  MissingCredential(Provider),
  #[error("provider {0} is not supported yet")]
  UnsupportedProvider(String),
  #[error("conversation is empty")]
  EmptyConversation,
  #[error("request failed: {0}")]
  Network(#[from] reqwest::Error),
  #[error("{provider} returned status {status}: {detail}")]
  Upstream {
    provider: Provider,
    status: u16,
    detail: String,
  },
}

pub trait ShapingStrategy: Send + Sync {
  fn apply_auth(&self, request: RequestBuilder, api_key: &str) -> RequestBuilder;
  fn build_body(&self, provider: Provider, messages: &[ChatMessage]) -> Value;
  fn extract_text(&self, payload: &Value) -> Option<String>;
}

// String boundary for callers that hold a provider name rather than the
// enum; an unrecognized name fails the same way an unwired provider does.
pub async fn request_completion_by_name(
  provider_name: &str,
  messages: &[ChatMessage],
  api_key: &str,
  base_url: Option<&str>,
) -> Result<String, ProviderError> {
  let provider = Provider::from_name(provider_name)
    .ok_or_else(|| ProviderError::UnsupportedProvider(provider_name.to_string()))?;
  request_completion(provider, messages, api_key, base_url).await
}

pub async fn request_completion(
  provider: Provider,
  messages: &[ChatMessage],
  api_key: &str,
  base_url: Option<&str>,
) -> Result<String, ProviderError> {
  if api_key.trim().is_empty() {
    return Err(ProviderError::MissingCredential(provider));
  }
  if messages.is_empty() {
    return Err(ProviderError::EmptyConversation);
  }
  let strategy = registry::strategy_for(provider)
    .ok_or_else(|| ProviderError::UnsupportedProvider(provider.to_string()))?;

  let endpoint = base_url.unwrap_or_else(|| registry::endpoint(provider));
  let body = strategy.build_body(provider, messages);

  let client = reqwest::Client::new();
  let request = client
    .post(endpoint)
    .header("Content-Type", "application/json");
  let request = strategy.apply_auth(request, api_key);

  let response = request.json(&body).send().await?;
  let status = response.status();
  if !status.is_success() {
    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<Value>(&text) {
      Ok(parsed) => parsed.to_string(),
      Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    return Err(ProviderError::Upstream {
      provider,
      status: status.as_u16(),
      detail,
    });
  }

  let payload: Value = response.json().await?;
  Ok(
    strategy
      .extract_text(&payload)
      .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::providers::registry::ALL_PROVIDERS;

  #[tokio::test]
  async fn empty_credential_fails_fast_for_every_provider() {
    let messages = vec![ChatMessage::user("Hi")];
    for provider in ALL_PROVIDERS {
      let result = request_completion(*provider, &messages, "", None).await;
      assert!(
        matches!(result, Err(ProviderError::MissingCredential(p)) if p == *provider),
        "expected MissingCredential for {}",
        provider
      );
      let result = request_completion(*provider, &messages, "   ", None).await;
      assert!(matches!(result, Err(ProviderError::MissingCredential(_))));
    }
  }

  #[tokio::test]
  async fn empty_conversation_is_rejected() {
    let result = request_completion(Provider::OpenAI, &[], "sk-test", None).await;
    assert!(matches!(result, Err(ProviderError::EmptyConversation)));
  }

  #[tokio::test]
  async fn unwired_provider_fails_before_any_network_call() {
    let messages = vec![ChatMessage::user("Hi")];
    for provider in [
      Provider::Anthropic,
      Provider::Cohere,
      Provider::HuggingFace,
      Provider::Ollama,
    ] {
      let result = request_completion(provider, &messages, "key", None).await;
      match result {
        Err(ProviderError::UnsupportedProvider(name)) => {
          assert_eq!(name, provider.name());
        }
        other => panic!("expected UnsupportedProvider, got {:?}", other.err()),
      }
    }
  }

  #[tokio::test]
  async fn unknown_provider_name_fails_before_any_network_call() {
    let messages = vec![ChatMessage::user("Hi")];
    let result = request_completion_by_name("SkyNet", &messages, "key", None).await;
    match result {
      Err(ProviderError::UnsupportedProvider(name)) => assert_eq!(name, "SkyNet"),
      other => panic!("expected UnsupportedProvider, got {:?}", other.err()),
    }

    let result = request_completion_by_name("google", &messages, "", None).await;
    assert!(matches!(
      result,
      Err(ProviderError::MissingCredential(Provider::Google))
    ));
  }

  #[test]
  fn error_messages_name_the_provider() {
    let error = ProviderError::MissingCredential(Provider::Groq);
    assert!(error.to_string().contains("Groq"));
    let error = ProviderError::Upstream {
      provider: Provider::OpenAI,
      status: 429,
      detail: "{\"error\":\"rate limit\"}".into(),
    };
    let message = error.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("rate limit"));
  }

  #[test]
  fn chat_message_roles_serialize_lowercase() {
    let message = ChatMessage::assistant("hello");
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["content"], "hello");
  }
}
