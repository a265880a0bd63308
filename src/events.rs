use serde::{Deserialize, Serialize};

use crate::providers::{ChatMessage, Provider};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", content = "payload")]
pub enum ServerEvent {
  #[serde(rename = "chat.history")]
  ChatHistory {
    messages: Vec<ChatMessage>,
    provider: Provider,
  },
  #[serde(rename = "chat.message")]
  StreamMessage { message: ChatMessage },
  #[serde(rename = "chat.busy")]
  ChatBusy { busy: bool },
  #[serde(rename = "chat.error")]
  ChatError { message: String },
  #[serde(rename = "provider.selected")]
  ProviderSelected { provider: Provider },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", content = "payload")]
pub enum ClientEvent {
  #[serde(rename = "chat.history")]
  ChatHistory,
  #[serde(rename = "chat.send")]
  ChatSend { content: String },
  #[serde(rename = "chat.clear")]
  ChatClear,
  #[serde(rename = "provider.select")]
  ProviderSelect { provider: Provider },
  #[serde(rename = "apikey.set")]
  ApiKeySet { provider: Provider, key: String },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
  pub id: Provider,
  pub name: String,
  pub wired: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_event_serializes() {
    let event = ServerEvent::ChatError { message: "boom".into() };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"chat.error\""));
    assert!(json.contains("\"boom\""));
  }

  #[test]
  fn client_event_deserializes() {
    let event: ClientEvent = serde_json::from_str(
      "{\"type\":\"chat.send\",\"payload\":{\"content\":\"Hi\"}}",
    )
    .unwrap();
    assert_eq!(event, ClientEvent::ChatSend { content: "Hi".into() });

    let event: ClientEvent = serde_json::from_str(
      "{\"type\":\"apikey.set\",\"payload\":{\"provider\":\"google\",\"key\":\"k\"}}",
    )
    .unwrap();
    assert_eq!(
      event,
      ClientEvent::ApiKeySet { provider: Provider::Google, key: "k".into() }
    );
  }

  #[test]
  fn provider_info_uses_camel_case() {
    let info = ProviderInfo {
      id: Provider::OpenAI,
      name: "OpenAI".into(),
      wired: true,
    };
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["id"], "openai");
    assert_eq!(json["wired"], true);
  }
}
