use tauri::Manager;

pub mod commands;
pub mod config;
pub mod events;
pub mod providers;
pub mod state;
pub mod storage;

use state::ChatState;
use storage::ChatStore;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  tauri::Builder::default()
    .manage(ChatState::new())
    .setup(|app| {
      if cfg!(debug_assertions) {
        app.handle().plugin(
          tauri_plugin_log::Builder::default()
            .level(log::LevelFilter::Info)
            .build(),
        )?;
      }
      match app.path().app_data_dir() {
        Ok(dir) => {
          if let Err(error) = std::fs::create_dir_all(&dir) {
            log::warn!("failed to create app data dir: {}", error);
          }
          match ChatStore::open(&dir.join("pathfinder.db")) {
            Ok(store) => app.state::<ChatState>().attach_store(store),
            Err(error) => log::warn!("running without persistence: {}", error),
          }
        }
        Err(error) => log::warn!("no app data dir, running without persistence: {}", error),
      }
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::chat::provider_list,
      commands::chat::client_event
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
