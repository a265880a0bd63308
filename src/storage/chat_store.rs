use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Result};

use crate::providers::{ChatMessage, Provider};

const MESSAGES_KEY: &str = "chat.messages";
const SELECTED_PROVIDER_KEY: &str = "provider.selected";

pub struct ChatStore {
  conn: Connection,
}

impl ChatStore {
  pub fn open(path: &Path) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  pub fn new_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute(
      "create table if not exists kv(key text primary key, value text not null)",
      [],
    )?;
    Ok(Self { conn })
  }

  fn get(&self, key: &str) -> Result<Option<String>> {
    self
      .conn
      .query_row("select value from kv where key = ?1", [key], |row| row.get(0))
      .optional()
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "insert into kv(key,value) values (?1,?2) \
       on conflict(key) do update set value = excluded.value",
      (key, value),
    )?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.conn.execute("delete from kv where key = ?1", [key])?;
    Ok(())
  }

  // Malformed stored blobs are discarded, never surfaced to the UI.
  pub fn load_messages(&self) -> Result<Vec<ChatMessage>> {
    let raw = match self.get(MESSAGES_KEY)? {
      Some(raw) => raw,
      None => return Ok(Vec::new()),
    };
    match serde_json::from_str(&raw) {
      Ok(messages) => Ok(messages),
      Err(error) => {
        log::warn!("discarding malformed stored conversation: {}", error);
        self.remove(MESSAGES_KEY)?;
        Ok(Vec::new())
      }
    }
  }

  pub fn save_messages(&self, messages: &[ChatMessage]) -> Result<()> {
    let raw = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
    self.set(MESSAGES_KEY, &raw)
  }

  pub fn api_key(&self, provider: Provider) -> Result<Option<String>> {
    self.get(&api_key_key(provider))
  }

  pub fn set_api_key(&self, provider: Provider, key: &str) -> Result<()> {
    if key.is_empty() {
      return self.remove(&api_key_key(provider));
    }
    self.set(&api_key_key(provider), key)
  }

  pub fn selected_provider(&self) -> Result<Option<Provider>> {
    let raw = match self.get(SELECTED_PROVIDER_KEY)? {
      Some(raw) => raw,
      None => return Ok(None),
    };
    match Provider::from_name(&raw) {
      Some(provider) => Ok(Some(provider)),
      None => {
        log::warn!("discarding unknown stored provider: {}", raw);
        self.remove(SELECTED_PROVIDER_KEY)?;
        Ok(None)
      }
    }
  }

  pub fn set_selected_provider(&self, provider: Provider) -> Result<()> {
    self.set(SELECTED_PROVIDER_KEY, provider.name())
  }
}

fn api_key_key(provider: Provider) -> String {
  format!("apikey.{}", provider.name().to_ascii_lowercase())
}
