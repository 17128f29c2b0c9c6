use crate::commands::lock_session;
use crate::session_state::{emit_session_state, SessionState};
use crate::status::{set_status, StatusKind};
use crate::summary::format_summary_for_email;
use crate::ManagedSessionState;
use chrono::Local;
use log::{debug, error, info};
use tauri::{AppHandle, State};
use tauri_plugin_clipboard_manager::ClipboardExt;
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;

// All three export paths share the same formatted text, built from the
// user-edited draft rather than the raw backend result.
fn formatted_export(session: &SessionState) -> Option<String> {
    session.edited_summary.as_ref().map(format_summary_for_email)
}

#[tauri::command]
#[specta::specta]
pub fn copy_summary_to_clipboard(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;

    let text = match formatted_export(&session) {
        Some(text) => text,
        None => {
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "No summary available to copy",
            );
            emit_session_state(&app, &session);
            return Ok(());
        }
    };

    match app.clipboard().write_text(text) {
        Ok(()) => {
            set_status(
                &app,
                &mut session,
                StatusKind::Success,
                "Summary copied to clipboard",
            );
        }
        Err(e) => {
            error!("Failed to write summary to clipboard: {}", e);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Failed to copy to clipboard. Please try again.",
            );
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}

/// Save the formatted summary as a plain-text file. The dialog is pre-filled
/// with `meeting-summary-<date>.txt`; dismissing it is not an error.
#[tauri::command]
#[specta::specta]
pub fn download_summary(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
) -> Result<(), String> {
    let text = {
        let mut session = lock_session(&state)?;
        match formatted_export(&session) {
            Some(text) => text,
            None => {
                set_status(
                    &app,
                    &mut session,
                    StatusKind::Error,
                    "No summary available to download",
                );
                emit_session_state(&app, &session);
                return Ok(());
            }
        }
    };

    let file_name = format!("meeting-summary-{}.txt", Local::now().format("%Y-%m-%d"));
    let picked = app
        .dialog()
        .file()
        .set_file_name(&file_name)
        .add_filter("Text", &["txt"])
        .blocking_save_file();

    let Some(file_path) = picked else {
        debug!("Save dialog dismissed");
        return Ok(());
    };

    let write_result = file_path
        .into_path()
        .map_err(|e| e.to_string())
        .and_then(|path| std::fs::write(&path, &text).map_err(|e| e.to_string()));

    let mut session = lock_session(&state)?;
    match write_result {
        Ok(()) => {
            info!("Summary saved to file");
            set_status(
                &app,
                &mut session,
                StatusKind::Success,
                "Summary downloaded successfully",
            );
        }
        Err(e) => {
            error!("Failed to save summary file: {}", e);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Failed to save summary file. Please try again.",
            );
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}

/// Hand the formatted summary to the platform's default mail client through a
/// mailto: URL with percent-encoded subject and body.
#[tauri::command]
#[specta::specta]
pub fn email_summary(app: AppHandle, state: State<'_, ManagedSessionState>) -> Result<(), String> {
    let mut session = lock_session(&state)?;

    let text = match formatted_export(&session) {
        Some(text) => text,
        None => {
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "No summary available to email",
            );
            emit_session_state(&app, &session);
            return Ok(());
        }
    };

    let subject = urlencoding::encode("Meeting Summary");
    let body = urlencoding::encode(&text);
    let mailto_link = format!("mailto:?subject={}&body={}", subject, body);

    match app.opener().open_url(mailto_link, None::<&str>) {
        Ok(()) => {
            set_status(
                &app,
                &mut session,
                StatusKind::Info,
                "Opening your email client...",
            );
        }
        Err(e) => {
            error!("Failed to open email client: {}", e);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Failed to open email client. Please try again.",
            );
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}
