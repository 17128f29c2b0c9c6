pub mod edit;
pub mod export;
pub mod session;
pub mod transcript;

use crate::session_state::SessionState;
use crate::settings::{self, AppSettings, LogLevelSetting};
use crate::ManagedSessionState;
use std::sync::atomic::Ordering;
use tauri::{AppHandle, State};

pub(crate) fn lock_session<'a>(
    state: &'a State<'_, ManagedSessionState>,
) -> Result<std::sync::MutexGuard<'a, SessionState>, String> {
    state
        .lock()
        .map_err(|_| "Session state lock poisoned".to_string())
}

#[tauri::command]
#[specta::specta]
pub fn get_app_settings(app: AppHandle) -> Result<AppSettings, String> {
    Ok(settings::get_settings(&app))
}

#[tauri::command]
#[specta::specta]
pub fn get_default_settings() -> AppSettings {
    settings::get_default_settings()
}

#[tauri::command]
#[specta::specta]
pub fn set_backend_base_url(app: AppHandle, base_url: String) -> Result<(), String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err("Backend base URL cannot be empty".to_string());
    }

    let mut settings = settings::get_settings(&app);
    settings.backend_base_url = trimmed.trim_end_matches('/').to_string();
    settings::write_settings(&app, settings);

    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn set_log_level(app: AppHandle, level: LogLevelSetting) -> Result<(), String> {
    crate::FILE_LOG_LEVEL.store(level.to_level_filter() as u8, Ordering::Relaxed);

    let mut settings = settings::get_settings(&app);
    settings.log_level = level;
    settings::write_settings(&app, settings);

    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn get_session_state(state: State<'_, ManagedSessionState>) -> Result<SessionState, String> {
    Ok(lock_session(&state)?.clone())
}
