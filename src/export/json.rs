//! JSON export and import of an owner's notes.

use crate::domain::{Note, NoteContent, NoteKind, OwnerId, Tag};
use crate::store::{ContentInput, NewNote, NoteStore, StoreError};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while exporting or importing notes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The import payload is valid JSON but not a list of notes.
    #[error("invalid data format: expected a list of notes")]
    NotAList,
}

/// One note in the export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedNote {
    #[serde(deserialize_with = "lenient_datetime")]
    pub note_created_date: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub note_updated_date: DateTime<Utc>,
    #[serde(default = "default_kind")]
    pub note_type: NoteKind,
    /// Markdown source, or the SVG preview of a sketch.
    #[serde(default)]
    pub note_content: Option<String>,
    /// Drawing payload of a sketch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_drawing: Option<String>,
    #[serde(default)]
    pub note_tags: Vec<Tag>,
}

fn default_kind() -> NoteKind {
    NoteKind::Markdown
}

/// Accepts RFC 3339 timestamps as well as offset-less ISO 8601 (read as UTC).
fn lenient_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}

impl From<&Note> for ExportedNote {
    fn from(note: &Note) -> Self {
        let (content, drawing) = match note.content() {
            NoteContent::Markdown { source, .. } => (Some(source.clone()), None),
            NoteContent::Sketch { drawing, svg } => (svg.clone(), Some(drawing.clone())),
        };
        Self {
            note_created_date: note.created(),
            note_updated_date: note.modified(),
            note_type: note.kind(),
            note_content: content,
            note_drawing: drawing,
            note_tags: note.tags().to_vec(),
        }
    }
}

impl ExportedNote {
    fn into_new_note(self, owner: &OwnerId) -> NewNote {
        let content = match self.note_type {
            NoteKind::Markdown => ContentInput::Markdown(self.note_content.unwrap_or_default()),
            NoteKind::Sketch => ContentInput::Sketch {
                drawing: self.note_drawing.unwrap_or_default(),
                svg: self.note_content,
            },
        };
        NewNote::new(owner.clone(), content, self.note_tags)
            .created_at(self.note_created_date)
            .modified_at(self.note_updated_date)
    }
}

/// Collects an owner's notes for export, oldest first.
pub fn export_notes<S: NoteStore + ?Sized>(
    store: &S,
    owner: &OwnerId,
) -> Result<Vec<ExportedNote>, ExportError> {
    let mut notes = store.list_notes(owner)?;
    // stable: notes created together stay in id order
    notes.sort_by_key(|n| n.created());
    Ok(notes.iter().map(ExportedNote::from).collect())
}

/// Serializes exported notes as pretty-printed JSON.
pub fn to_json(notes: &[ExportedNote]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// Creates one note per entry of an export file. Returns the number imported.
///
/// The whole payload is validated before anything is written, and the notes
/// are stored in a single transaction: a failed import leaves the store as it
/// was.
pub fn import_notes<S: NoteStore + ?Sized>(
    store: &mut S,
    owner: &OwnerId,
    json: &str,
) -> Result<usize, ExportError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(ExportError::NotAList);
    }
    let entries: Vec<ExportedNote> = serde_json::from_value(value)?;

    let notes = entries
        .into_iter()
        .map(|entry| entry.into_new_note(owner))
        .collect();
    let count = store.create_notes(notes)?.len();
    info!(owner = %owner, count, "imported notes");
    Ok(count)
}
