//! Core types: Note, NoteId, OwnerId, Tag

mod note;
mod note_id;
mod owner;
mod tag;

pub use note::{Note, NoteBuilder, NoteContent, NoteKind, ParseNoteKindError, note_title};
pub use note_id::{NoteId, ParseNoteIdError};
pub use owner::{OwnerId, ParseOwnerIdError};
pub use tag::{ParseTagError, Tag, join_tags, parse_tag_input};
