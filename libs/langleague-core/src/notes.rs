//! Deciding what saving a unit note means for the backend.

use crate::types::Note;
use chrono::{DateTime, Utc};

/// Request needed to bring the stored note in line with the edited text.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteChange {
    Create(Note),
    Update(Note),
    /// Blank text removes the stored note.
    Delete(i64),
    Unchanged,
}

/// Plan the save of `content` as the user's note on `unit_id`.
///
/// Content is trimmed. A blank note deletes the stored one, or does nothing
/// when there is none. Saving the stored text again does nothing.
pub fn plan_note_save(
    existing: Option<&Note>,
    unit_id: i64,
    content: &str,
    now: DateTime<Utc>,
) -> NoteChange {
    let content = content.trim();
    let stored = existing.and_then(|note| note.id.map(|id| (id, note)));

    match stored {
        None if content.is_empty() => NoteChange::Unchanged,
        None => NoteChange::Create(Note {
            content: content.to_string(),
            created_at: Some(now),
            unit_id: Some(unit_id),
            ..Default::default()
        }),
        Some((id, _)) if content.is_empty() => NoteChange::Delete(id),
        Some((_, note)) if note.content.trim() == content => NoteChange::Unchanged,
        Some((_, note)) => NoteChange::Update(Note {
            content: content.to_string(),
            updated_at: Some(now),
            unit_id: note.unit_id.or(Some(unit_id)),
            ..note.clone()
        }),
    }
}
