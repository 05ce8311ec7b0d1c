//! Note struct: owned, tagged markdown or sketch content.

use crate::domain::{NoteId, OwnerId, Tag, join_tags};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type discriminator of a note.
///
/// Sketches serialize as `"excalidraw"`, the name the drawing editor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "excalidraw", alias = "sketch")]
    Sketch,
}

impl NoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Markdown => "markdown",
            NoteKind::Sketch => "excalidraw",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown note type name.
#[derive(Debug, Clone)]
pub struct ParseNoteKindError(String);

impl fmt::Display for ParseNoteKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown note type '{}': expected markdown or excalidraw",
            self.0
        )
    }
}

impl std::error::Error for ParseNoteKindError {}

impl FromStr for NoteKind {
    type Err = ParseNoteKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "markdown" => Ok(NoteKind::Markdown),
            "excalidraw" | "sketch" => Ok(NoteKind::Sketch),
            other => Err(ParseNoteKindError(other.to_string())),
        }
    }
}

/// The body of a note.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteContent {
    /// Markdown source together with its rendered HTML.
    Markdown { source: String, html: String },
    /// Opaque drawing payload with an optional SVG preview.
    Sketch {
        drawing: String,
        svg: Option<String>,
    },
}

impl NoteContent {
    pub fn kind(&self) -> NoteKind {
        match self {
            NoteContent::Markdown { .. } => NoteKind::Markdown,
            NoteContent::Sketch { .. } => NoteKind::Sketch,
        }
    }
}

/// A note belonging to one owner.
///
/// The title is derived, never typed by the user: the creation date followed
/// by the comma-joined tags, e.g. `2024-03-01-work,ideas`.
///
/// # Examples
///
/// ```
/// use fastnote::domain::{Note, NoteContent, NoteId, OwnerId, Tag};
/// use chrono::{TimeZone, Utc};
///
/// let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
/// let content = NoteContent::Markdown { source: "hi".into(), html: "<p>hi</p>".into() };
/// let note = Note::builder(NoteId::new(1), OwnerId::new("ana").unwrap(), content, created, created)
///     .tags(vec![Tag::new("work").unwrap()])
///     .build();
/// assert_eq!(note.title(), "2024-03-01-work");
/// assert_eq!(note.text_content(), Some("hi"));
/// ```
#[derive(Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    owner: OwnerId,
    title: String,
    content: NoteContent,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Note {
    /// Creates a builder for constructing a Note.
    pub fn builder(
        id: NoteId,
        owner: OwnerId,
        content: NoteContent,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder {
            id,
            owner,
            content,
            tags: Vec::new(),
            created,
            modified,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> NoteKind {
        self.content.kind()
    }

    pub fn content(&self) -> &NoteContent {
        &self.content
    }

    /// Returns the searchable text body.
    ///
    /// Only markdown notes have one; sketches return `None`.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            NoteContent::Markdown { source, .. } => Some(source),
            NoteContent::Sketch { .. } => None,
        }
    }

    /// Returns the rendered HTML (markdown) or SVG preview (sketch).
    pub fn html(&self) -> Option<&str> {
        match &self.content {
            NoteContent::Markdown { html, .. } => Some(html),
            NoteContent::Sketch { svg, .. } => svg.as_deref(),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("title", &self.title)
            .field("kind", &self.kind())
            .field("tags", &self.tags)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}

/// Builds the derived title of a note.
pub fn note_title(created: DateTime<Utc>, tags: &[Tag]) -> String {
    format!("{}-{}", created.format("%Y-%m-%d"), join_tags(tags))
}

/// Builder for constructing a Note.
pub struct NoteBuilder {
    id: NoteId,
    owner: OwnerId,
    content: NoteContent,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl NoteBuilder {
    /// Sets the note's tags.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = deduplicate_tags(tags);
        self
    }

    /// Builds the Note, deriving its title.
    pub fn build(self) -> Note {
        Note {
            title: note_title(self.created, &self.tags),
            id: self.id,
            owner: self.owner,
            content: self.content,
            tags: self.tags,
            created: self.created,
            modified: self.modified,
        }
    }
}

/// Removes duplicate tags (by exact equality).
fn deduplicate_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = Vec::new();
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}
