use crate::commands::lock_session;
use crate::session_state::emit_session_state;
use crate::settings;
use crate::status::{clear_status, set_status, StatusKind};
use crate::summarizer_client::{self, BackendError};
use crate::ManagedSessionState;
use log::{error, info};
use tauri::{AppHandle, State};

// Instruction sent when the user leaves the prompt field empty
const DEFAULT_INSTRUCTION: &str = "Generate a clear, concise summary";

/// Start a summarization session from the current transcript. Requires a
/// non-blank transcript; the loading flag is held for the duration of the
/// request and the result replaces both the summary and the editable draft.
#[tauri::command]
#[specta::specta]
pub async fn generate_summary(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
) -> Result<(), String> {
    let (transcript, instruction) = {
        let mut session = lock_session(&state)?;

        if session.transcript.trim().is_empty() {
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Please enter or upload a transcript first",
            );
            emit_session_state(&app, &session);
            return Ok(());
        }

        session.loading = true;
        clear_status(&app, &mut session);
        emit_session_state(&app, &session);

        let instruction = if session.instruction.trim().is_empty() {
            DEFAULT_INSTRUCTION.to_string()
        } else {
            session.instruction.clone()
        };
        (session.transcript.clone(), instruction)
    };

    let base_url = settings::effective_backend_base_url(&app);
    let result = summarizer_client::start_session(&base_url, transcript, instruction).await;

    let mut session = lock_session(&state)?;
    session.loading = false;
    match result {
        Ok(response) => {
            info!("Summary generated (session {})", response.session_id);
            session.apply_new_summary(response.summary, Some(response.session_id));
            set_status(
                &app,
                &mut session,
                StatusKind::Success,
                "Summary generated successfully",
            );
        }
        Err(BackendError::Api(message)) => {
            error!("Summary generation rejected by backend: {}", message);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                format!("Error: {}", message),
            );
        }
        Err(BackendError::Connection(message)) => {
            error!("Summary generation failed: {}", message);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Error connecting to server. Please try again.",
            );
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}

/// Apply the current instruction to the existing session, replacing the
/// summary. Requires a session from a previous generation and a non-blank
/// instruction; clears the instruction on success, ready for the next turn.
#[tauri::command]
#[specta::specta]
pub async fn refine_summary(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
) -> Result<(), String> {
    let (session_id, prompt) = {
        let mut session = lock_session(&state)?;

        let session_id = match session.session_id.clone() {
            Some(id) if !session.instruction.trim().is_empty() => id,
            _ => {
                set_status(
                    &app,
                    &mut session,
                    StatusKind::Error,
                    "Please enter a refinement instruction",
                );
                emit_session_state(&app, &session);
                return Ok(());
            }
        };

        session.loading = true;
        emit_session_state(&app, &session);
        (session_id, session.instruction.clone())
    };

    let base_url = settings::effective_backend_base_url(&app);
    let result = summarizer_client::refine(&base_url, session_id, prompt).await;

    let mut session = lock_session(&state)?;
    session.loading = false;
    match result {
        Ok(response) => {
            info!("Summary refined");
            session.apply_new_summary(response.summary, None);
            session.instruction.clear();
            set_status(
                &app,
                &mut session,
                StatusKind::Success,
                "Summary refined successfully",
            );
        }
        Err(BackendError::Api(message)) => {
            error!("Summary refinement rejected by backend: {}", message);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                format!("Error: {}", message),
            );
        }
        Err(BackendError::Connection(message)) => {
            error!("Summary refinement failed: {}", message);
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Error refining summary. Please try again.",
            );
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}
