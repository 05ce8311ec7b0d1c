//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, NoteId, NoteKind, Tag};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A full note in `show` and `new` output.
#[derive(Debug, Serialize)]
pub struct NoteDetail {
    pub id: NoteId,
    pub title: String,
    pub note_type: NoteKind,
    pub tags: Vec<Tag>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl From<&Note> for NoteDetail {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id(),
            title: note.title().to_string(),
            note_type: note.kind(),
            tags: note.tags().to_vec(),
            created: note.created(),
            modified: note.modified(),
            content: note.text_content().map(str::to_string),
            html: note.html().map(str::to_string),
        }
    }
}

/// A tag with optional count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}
