use crate::commands::lock_session;
use crate::session_state::{emit_session_state, TranscriptSource};
use crate::status::{set_status, StatusKind};
use crate::transcript::{classify_transcript_file, extract_transcript, TranscriptFileKind};
use crate::ManagedSessionState;
use log::{error, info};
use std::path::Path;
use tauri::{AppHandle, State};

/// Ingest an uploaded transcript file. Plain-text files are stored as-is,
/// .docx files go through raw-text extraction, anything else is rejected with
/// a status message and the current transcript is left untouched.
#[tauri::command]
#[specta::specta]
pub fn load_transcript_file(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    file_path: String,
) -> Result<(), String> {
    info!("Loading transcript file: {}", file_path);
    let path = Path::new(&file_path);

    let kind = match classify_transcript_file(path) {
        Some(kind) => kind,
        None => {
            let mut session = lock_session(&state)?;
            set_status(
                &app,
                &mut session,
                StatusKind::Error,
                "Please upload a .txt or .docx file",
            );
            emit_session_state(&app, &session);
            return Ok(());
        }
    };

    {
        let mut session = lock_session(&state)?;
        session.source = TranscriptSource::Uploaded;
        set_status(&app, &mut session, StatusKind::Info, "Processing file...");
        emit_session_state(&app, &session);
    }

    let outcome = extract_transcript(path, kind);

    let mut session = lock_session(&state)?;
    match outcome {
        Ok(text) => {
            session.apply_uploaded_transcript(text);
            let message = match kind {
                TranscriptFileKind::PlainText => "File uploaded successfully",
                TranscriptFileKind::Docx => "File uploaded and processed successfully",
            };
            set_status(&app, &mut session, StatusKind::Success, message);
        }
        Err(e) => {
            error!("Failed to read transcript file: {:#}", e);
            // unlock the text area for another attempt
            session.source = TranscriptSource::Typed;
            let message = match kind {
                TranscriptFileKind::PlainText => "Error uploading file. Please try again.",
                TranscriptFileKind::Docx => "Error processing document file. Please try again.",
            };
            set_status(&app, &mut session, StatusKind::Error, message);
        }
    }
    emit_session_state(&app, &session);

    Ok(())
}

/// Direct edit of the transcript text area. Clears upload mode and the
/// last-received summary.
#[tauri::command]
#[specta::specta]
pub fn set_transcript_text(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    text: String,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.set_transcript_text(text);
    emit_session_state(&app, &session);
    Ok(())
}

#[tauri::command]
#[specta::specta]
pub fn set_instruction(
    app: AppHandle,
    state: State<'_, ManagedSessionState>,
    text: String,
) -> Result<(), String> {
    let mut session = lock_session(&state)?;
    session.set_instruction(text);
    emit_session_state(&app, &session);
    Ok(())
}
