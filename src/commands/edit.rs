use crate::commands::lock_session;
use crate::session_state::emit_session_state;
use crate::ManagedSessionState;
use tauri::{AppHandle, State};

// These commands mutate only the editable draft; the last-received summary is
// never touched.

#[tauri::command]
#[specta::specta]
pub fn update_detailed_summary(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    value: String,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.update_detailed_summary(value)?;
    emit_session_state(&app, &session);
    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn update_bullet_point(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    index: u32,
    value: String,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.update_bullet_point(index as usize, value)?;
    emit_session_state(&app, &session);
    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn update_note(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    index: u32,
    value: String,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.update_note(index as usize, value)?;
    emit_session_state(&app, &session);
    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn add_bullet_point(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.add_bullet_point()?;
    emit_session_state(&app, &session);
    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn remove_bullet_point(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    index: u32,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.remove_bullet_point(index as usize)?;
    emit_session_state(&app, &session);
    Ok(())
}
