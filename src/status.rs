use serde::Serialize;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager};

use crate::session_state::SessionState;
use crate::ManagedSessionState;

pub const STATUS_EVENT: &str = "status-changed";

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, specta::Type)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, specta::Type)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Replace the current status message and schedule it to clear after the
/// fixed delay. The scheduled clear carries the message's epoch and becomes a
/// no-op once a newer message exists, so rapid sequential actions never lose
/// their status to an older timer.
pub fn set_status(
    app: &AppHandle,
    state: &mut SessionState,
    kind: StatusKind,
    text: impl Into<String>,
) {
    let epoch = state.set_status_message(StatusMessage {
        text: text.into(),
        kind,
    });
    emit_status(app, state.status.as_ref());

    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(STATUS_CLEAR_DELAY).await;
        clear_status_if_current(&app, epoch);
    });
}

/// Clear the status immediately, without waiting for the timer.
pub fn clear_status(app: &AppHandle, state: &mut SessionState) {
    if state.status.take().is_some() {
        emit_status(app, None);
    }
}

fn clear_status_if_current(app: &AppHandle, epoch: u64) {
    let managed = app.state::<ManagedSessionState>();
    let mut state = match managed.lock() {
        Ok(state) => state,
        Err(_) => {
            log::warn!("Failed to lock session state while clearing status");
            return;
        }
    };

    if state.clear_status_if_epoch(epoch) {
        emit_status(app, None);
    }
}

fn emit_status(app: &AppHandle, status: Option<&StatusMessage>) {
    if let Err(e) = app.emit(STATUS_EVENT, status) {
        log::warn!("Failed to emit status message: {}", e);
    }
}
