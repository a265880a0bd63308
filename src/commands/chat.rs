use tauri::{AppHandle, Emitter, Manager, State};
use tokio::time::timeout;

use crate::config;
use crate::events::{ClientEvent, ProviderInfo, ServerEvent};
use crate::providers::registry;
use crate::providers::{request_completion, ChatMessage, Provider, ALL_PROVIDERS};
use crate::state::ChatState;

#[tauri::command]
pub fn provider_list() -> Vec<ProviderInfo> {
  ALL_PROVIDERS
    .iter()
    .map(|provider| ProviderInfo {
      id: *provider,
      name: provider.name().to_string(),
      wired: registry::is_wired(*provider),
    })
    .collect()
}

#[tauri::command]
pub async fn client_event(
  app: AppHandle,
  state: State<'_, ChatState>,
  event: ClientEvent,
) -> Result<(), String> {
  match event {
    ClientEvent::ChatHistory => emit_history(&app, &state),
    ClientEvent::ChatClear => {
      state.clear_messages();
      emit_history(&app, &state)
    }
    ClientEvent::ProviderSelect { provider } => {
      state.select_provider(provider);
      emit(&app, ServerEvent::ProviderSelected { provider })
    }
    ClientEvent::ApiKeySet { provider, key } => {
      state.set_api_key(provider, key);
      Ok(())
    }
    ClientEvent::ChatSend { content } => handle_send(app, &state, content),
  }
}

fn handle_send(app: AppHandle, state: &ChatState, content: String) -> Result<(), String> {
  let content = content.trim().to_string();
  if content.is_empty() {
    return emit(
      &app,
      ServerEvent::ChatError { message: "Please enter a message".into() },
    );
  }

  let provider = state.selected_provider();
  let user_message = ChatMessage::user(content);
  state.append_message(user_message.clone());
  emit(&app, ServerEvent::StreamMessage { message: user_message })?;

  let api_key = match state.api_key_for(provider) {
    Some(key) => key,
    None => {
      emit(
        &app,
        ServerEvent::ChatError {
          message: format!("Please add your {} API key in the sidebar.", provider),
        },
      )?;
      let hint = ChatMessage::assistant(format!(
        "Please add your {} API key in the sidebar to use this feature.",
        provider
      ));
      state.append_message(hint.clone());
      return emit(&app, ServerEvent::StreamMessage { message: hint });
    }
  };

  emit(&app, ServerEvent::ChatBusy { busy: true })?;
  tauri::async_runtime::spawn(async move {
    run_turn(&app, provider, api_key).await;
    let _ = emit(&app, ServerEvent::ChatBusy { busy: false });
  });

  Ok(())
}

// One adapter call per user turn. No retries; a failed turn stays in the
// transcript and the user can send again or switch providers.
async fn run_turn(app: &AppHandle, provider: Provider, api_key: String) {
  let state = app.state::<ChatState>();
  let messages = state.snapshot();

  let deadline = config::request_timeout();
  let outcome = match timeout(deadline, request_completion(provider, &messages, &api_key, None)).await
  {
    Ok(result) => result.map_err(|error| error.to_string()),
    Err(_) => Err(format!(
      "request to {} timed out after {}s",
      provider,
      deadline.as_secs()
    )),
  };

  match outcome {
    Ok(text) => {
      let message = ChatMessage::assistant(text);
      state.append_message(message.clone());
      let _ = emit(app, ServerEvent::StreamMessage { message });
    }
    Err(message) => {
      log::warn!("chat turn against {} failed: {}", provider, message);
      let transcript = ChatMessage::assistant(format!("Error: {}", message));
      state.append_message(transcript.clone());
      let _ = emit(app, ServerEvent::StreamMessage { message: transcript });
      let _ = emit(app, ServerEvent::ChatError { message });
    }
  }
}

fn emit_history(app: &AppHandle, state: &ChatState) -> Result<(), String> {
  emit(
    app,
    ServerEvent::ChatHistory {
      messages: state.snapshot(),
      provider: state.selected_provider(),
    },
  )
}

fn emit(app: &AppHandle, event: ServerEvent) -> Result<(), String> {
  app.emit("server-event", event).map_err(|e| e.to_string())
}
