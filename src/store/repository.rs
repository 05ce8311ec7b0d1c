//! NoteStore trait and its input/result types.

use crate::domain::{Note, NoteId, NoteKind, OwnerId, Tag};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The note does not exist or belongs to another owner.
    #[error("note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be turned back into a note.
    #[error("corrupt note row: {0}")]
    Corrupt(String),

    /// The requested change is not allowed.
    #[error("invalid note: {0}")]
    Validation(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Note body as supplied by the user, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentInput {
    /// Markdown source; the store renders the HTML.
    Markdown(String),
    /// Drawing payload with an optional SVG preview, stored as given.
    Sketch {
        drawing: String,
        svg: Option<String>,
    },
}

impl ContentInput {
    pub fn kind(&self) -> NoteKind {
        match self {
            ContentInput::Markdown(_) => NoteKind::Markdown,
            ContentInput::Sketch { .. } => NoteKind::Sketch,
        }
    }
}

/// A note to be created.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner: OwnerId,
    pub tags: Vec<Tag>,
    pub content: ContentInput,
    /// Explicit timestamps, used when importing. Defaults to now.
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl NewNote {
    /// Creates a note stamped with the current time.
    pub fn new(owner: OwnerId, content: ContentInput, tags: Vec<Tag>) -> Self {
        Self {
            owner,
            tags,
            content,
            created: None,
            modified: None,
        }
    }

    /// Overrides the creation (and initial modification) time.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Overrides the modification time.
    pub fn modified_at(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Replacement tags and content for an existing note.
///
/// The content must be of the same kind as the stored note.
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub tags: Vec<Tag>,
    pub content: ContentInput,
}

/// A tag with the number of notes carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWithCount {
    tag: Tag,
    count: u32,
}

impl TagWithCount {
    pub fn new(tag: Tag, count: u32) -> Self {
        Self { tag, count }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Storage for notes, always scoped to a single owner.
///
/// A note that belongs to another owner behaves exactly like a missing note.
pub trait NoteStore {
    /// Stores a new note, assigning its id, timestamps and title.
    fn create_note(&mut self, note: NewNote) -> StoreResult<Note>;

    /// Stores several notes in one transaction.
    ///
    /// Either every note is stored or, on error, none is.
    fn create_notes(&mut self, notes: Vec<NewNote>) -> StoreResult<Vec<Note>>;

    /// Replaces a note's tags and content, bumping its modification time.
    fn update_note(&mut self, owner: &OwnerId, id: NoteId, update: NoteUpdate)
    -> StoreResult<Note>;

    /// Retrieves a single note.
    fn get_note(&self, owner: &OwnerId, id: NoteId) -> StoreResult<Option<Note>>;

    /// Deletes a note. Fails with `NoteNotFound` if it is not the owner's.
    fn delete_note(&mut self, owner: &OwnerId, id: NoteId) -> StoreResult<()>;

    /// Lists the owner's notes in insertion order.
    fn list_notes(&self, owner: &OwnerId) -> StoreResult<Vec<Note>>;

    /// Returns the owner's distinct tags, sorted by name.
    fn all_tags(&self, owner: &OwnerId) -> StoreResult<Vec<TagWithCount>>;
}
