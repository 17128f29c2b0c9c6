use serde::Serialize;
use tauri::{AppHandle, Emitter};

use crate::status::StatusMessage;
use crate::summary::Summary;

pub const SESSION_STATE_EVENT: &str = "session-state-changed";

/// Where the current transcript text came from. While a file is the source the
/// UI keeps the text area read-only; a manual edit switches back to `Typed`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, specta::Type)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSource {
    #[default]
    Typed,
    Uploaded,
}

/// The entire client state as one aggregate value.
///
/// Invariants:
/// - `edited_summary` is reseeded from every summary the backend returns,
///   discarding unsent local edits.
/// - local edit operations only ever touch `edited_summary`; the last-received
///   `summary` stays intact for comparison and for gating the refine action.
/// - editing the transcript directly clears `Uploaded` mode and the
///   last-received summary.
#[derive(Serialize, Debug, Clone, Default, specta::Type)]
pub struct SessionState {
    pub transcript: String,
    pub source: TranscriptSource,
    pub instruction: String,
    pub loading: bool,
    pub summary: Option<Summary>,
    pub edited_summary: Option<Summary>,
    pub session_id: Option<String>,
    pub status: Option<StatusMessage>,
    #[serde(skip)]
    pub status_epoch: u64,
}

impl SessionState {
    /// Direct edit of the transcript text. Leaves upload mode and invalidates
    /// the last-received summary so the refine action disappears until the
    /// next generation.
    pub fn set_transcript_text(&mut self, text: String) {
        self.transcript = text;
        self.source = TranscriptSource::Typed;
        self.summary = None;
    }

    pub fn apply_uploaded_transcript(&mut self, text: String) {
        self.transcript = text;
        self.source = TranscriptSource::Uploaded;
    }

    pub fn set_instruction(&mut self, text: String) {
        self.instruction = text;
    }

    /// Install a summary received from the backend. The editable draft is
    /// reseeded from it, dropping any local edits made to the previous one.
    pub fn apply_new_summary(&mut self, summary: Summary, session_id: Option<String>) {
        self.edited_summary = Some(summary.clone());
        self.summary = Some(summary);
        if let Some(id) = session_id {
            self.session_id = Some(id);
        }
    }

    pub fn update_detailed_summary(&mut self, value: String) -> Result<(), String> {
        let edited = self.edited_summary_mut()?;
        edited.user_customized_summary = value;
        Ok(())
    }

    pub fn update_bullet_point(&mut self, index: usize, value: String) -> Result<(), String> {
        let edited = self.edited_summary_mut()?;
        let bullet = edited
            .initial_bullet_summary
            .get_mut(index)
            .ok_or_else(|| format!("Bullet index {} is out of range", index))?;
        *bullet = value;
        Ok(())
    }

    pub fn update_note(&mut self, index: usize, value: String) -> Result<(), String> {
        let edited = self.edited_summary_mut()?;
        let note = edited
            .clarifications_or_notes
            .get_mut(index)
            .ok_or_else(|| format!("Note index {} is out of range", index))?;
        *note = value;
        Ok(())
    }

    pub fn add_bullet_point(&mut self) -> Result<(), String> {
        let edited = self.edited_summary_mut()?;
        edited.initial_bullet_summary.push(String::new());
        Ok(())
    }

    pub fn remove_bullet_point(&mut self, index: usize) -> Result<(), String> {
        let edited = self.edited_summary_mut()?;
        if index >= edited.initial_bullet_summary.len() {
            return Err(format!("Bullet index {} is out of range", index));
        }
        edited.initial_bullet_summary.remove(index);
        Ok(())
    }

    /// Replace the status message and return the new epoch. The epoch lets a
    /// scheduled clear detect that a newer message has taken its place.
    pub fn set_status_message(&mut self, message: StatusMessage) -> u64 {
        self.status = Some(message);
        self.status_epoch += 1;
        self.status_epoch
    }

    /// Clear the status only if `epoch` is still current. Returns whether a
    /// message was actually cleared.
    pub fn clear_status_if_epoch(&mut self, epoch: u64) -> bool {
        if self.status_epoch == epoch && self.status.is_some() {
            self.status = None;
            true
        } else {
            false
        }
    }

    fn edited_summary_mut(&mut self) -> Result<&mut Summary, String> {
        self.edited_summary
            .as_mut()
            .ok_or_else(|| "No summary to edit".to_string())
    }
}

pub fn emit_session_state(app: &AppHandle, state: &SessionState) {
    if let Err(e) = app.emit(SESSION_STATE_EVENT, state) {
        log::warn!("Failed to emit session state: {}", e);
    }
}
