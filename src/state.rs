use std::collections::HashMap;
use std::sync::Mutex;

use crate::providers::{ChatMessage, Provider, ALL_PROVIDERS};
use crate::storage::ChatStore;

const DEFAULT_PROVIDER: Provider = Provider::Google;

pub struct ChatState {
  messages: Mutex<Vec<ChatMessage>>,
  api_keys: Mutex<HashMap<Provider, String>>,
  selected: Mutex<Provider>,
  store: Mutex<Option<ChatStore>>,
}

impl Default for ChatState {
  fn default() -> Self {
    Self {
      messages: Mutex::new(Vec::new()),
      api_keys: Mutex::new(HashMap::new()),
      selected: Mutex::new(DEFAULT_PROVIDER),
      store: Mutex::new(None),
    }
  }
}

impl ChatState {
  pub fn new() -> Self {
    Self::default()
  }

  // Hydrates in-memory state from disk, then keeps the store for writes.
  // A failed read behaves like first launch.
  pub fn attach_store(&self, store: ChatStore) {
    match store.load_messages() {
      Ok(messages) => *self.messages.lock().expect("message lock") = messages,
      Err(error) => log::warn!("failed to load conversation: {}", error),
    }
    match store.selected_provider() {
      Ok(Some(provider)) => *self.selected.lock().expect("provider lock") = provider,
      Ok(None) => {}
      Err(error) => log::warn!("failed to load selected provider: {}", error),
    }
    let mut keys = self.api_keys.lock().expect("key lock");
    for provider in ALL_PROVIDERS {
      match store.api_key(*provider) {
        Ok(Some(key)) => {
          keys.insert(*provider, key);
        }
        Ok(None) => {}
        Err(error) => log::warn!("failed to load API key for {}: {}", provider, error),
      }
    }
    drop(keys);
    *self.store.lock().expect("store lock") = Some(store);
  }

  pub fn snapshot(&self) -> Vec<ChatMessage> {
    self.messages.lock().expect("message lock").clone()
  }

  pub fn append_message(&self, message: ChatMessage) {
    let mut messages = self.messages.lock().expect("message lock");
    messages.push(message);
    let snapshot = messages.clone();
    drop(messages);
    self.persist_messages(&snapshot);
  }

  pub fn clear_messages(&self) {
    self.messages.lock().expect("message lock").clear();
    self.persist_messages(&[]);
  }

  pub fn selected_provider(&self) -> Provider {
    *self.selected.lock().expect("provider lock")
  }

  pub fn select_provider(&self, provider: Provider) {
    *self.selected.lock().expect("provider lock") = provider;
    self.with_store(|store| store.set_selected_provider(provider));
  }

  pub fn api_key_for(&self, provider: Provider) -> Option<String> {
    self
      .api_keys
      .lock()
      .expect("key lock")
      .get(&provider)
      .cloned()
  }

  pub fn set_api_key(&self, provider: Provider, key: String) {
    let mut keys = self.api_keys.lock().expect("key lock");
    if key.is_empty() {
      keys.remove(&provider);
    } else {
      keys.insert(provider, key.clone());
    }
    drop(keys);
    self.with_store(|store| store.set_api_key(provider, &key));
  }

  fn persist_messages(&self, messages: &[ChatMessage]) {
    self.with_store(|store| store.save_messages(messages));
  }

  fn with_store<F>(&self, write: F)
  where
    F: FnOnce(&ChatStore) -> rusqlite::Result<()>,
  {
    let store = self.store.lock().expect("store lock");
    if let Some(store) = store.as_ref() {
      if let Err(error) = write(store) {
        log::warn!("failed to persist chat state: {}", error);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_google_with_no_history() {
    let state = ChatState::new();
    assert_eq!(state.selected_provider(), Provider::Google);
    assert!(state.snapshot().is_empty());
    assert_eq!(state.api_key_for(Provider::OpenAI), None);
  }

  #[test]
  fn append_and_clear_update_the_transcript() {
    let state = ChatState::new();
    state.append_message(ChatMessage::user("Hi"));
    state.append_message(ChatMessage::assistant("Hello!"));
    assert_eq!(state.snapshot().len(), 2);
    state.clear_messages();
    assert!(state.snapshot().is_empty());
  }

  #[test]
  fn attach_store_hydrates_previous_session() {
    let store = ChatStore::new_in_memory().unwrap();
    store.save_messages(&[ChatMessage::user("old turn")]).unwrap();
    store.set_selected_provider(Provider::Groq).unwrap();
    store.set_api_key(Provider::Groq, "gsk-123").unwrap();

    let state = ChatState::new();
    state.attach_store(store);

    assert_eq!(state.snapshot().len(), 1);
    assert_eq!(state.selected_provider(), Provider::Groq);
    assert_eq!(state.api_key_for(Provider::Groq), Some("gsk-123".into()));
  }

  #[test]
  fn mutations_reach_the_attached_store() {
    let state = ChatState::new();
    state.attach_store(ChatStore::new_in_memory().unwrap());
    state.append_message(ChatMessage::user("persisted"));
    state.select_provider(Provider::Deepseek);
    state.set_api_key(Provider::Deepseek, "dk-1".into());

    // Clearing the key also clears it from the store view.
    state.set_api_key(Provider::Deepseek, String::new());
    assert_eq!(state.api_key_for(Provider::Deepseek), None);
    assert_eq!(state.snapshot()[0].content, "persisted");
  }
}
