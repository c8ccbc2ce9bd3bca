//! Personal unit notes.

use chrono::Utc;
use langleague_core::{plan_note_save, Note, NoteChange};
use reqwest::Method;
use tracing::{debug, info};

use super::{require_id, ApiClient};
use crate::error::Result;

impl ApiClient {
    /// The current user's notes on a unit, newest first.
    pub async fn unit_notes(&self, unit_id: i64) -> Result<Vec<Note>> {
        self.get_json(&format!(
            "/api/notes?unitId.equals={}&sort=createdAt,desc",
            unit_id
        ))
        .await
    }

    /// The current user's note on a unit, if any.
    pub async fn unit_note(&self, unit_id: i64) -> Result<Option<Note>> {
        Ok(self.unit_notes(unit_id).await?.into_iter().next())
    }

    pub async fn create_note(&self, note: &Note) -> Result<Note> {
        self.send_json(Method::POST, "/api/notes", note).await
    }

    pub async fn update_note(&self, note: &Note) -> Result<Note> {
        let id = require_id(note.id, "note")?;
        self.send_json(Method::PUT, &format!("/api/notes/{}", id), note)
            .await
    }

    pub async fn delete_note(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/notes/{}", id)).await
    }

    /// Save `content` as the note on a unit.
    ///
    /// Creates, updates or deletes the stored note as needed and returns the
    /// note as stored afterwards. Blank content leaves no note.
    pub async fn save_unit_note(&self, unit_id: i64, content: &str) -> Result<Option<Note>> {
        let existing = self.unit_note(unit_id).await?;
        match plan_note_save(existing.as_ref(), unit_id, content, Utc::now()) {
            NoteChange::Create(note) => {
                let created = self.create_note(&note).await?;
                info!("Created note {:?} on unit {}", created.id, unit_id);
                Ok(Some(created))
            }
            NoteChange::Update(note) => {
                let updated = self.update_note(&note).await?;
                info!("Updated note {:?} on unit {}", updated.id, unit_id);
                Ok(Some(updated))
            }
            NoteChange::Delete(id) => {
                self.delete_note(id).await?;
                info!("Deleted note {} on unit {}", id, unit_id);
                Ok(None)
            }
            NoteChange::Unchanged => {
                debug!("Note on unit {} unchanged", unit_id);
                Ok(existing)
            }
        }
    }
}
