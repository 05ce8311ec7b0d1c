//! Note storage: the NoteStore trait and its SQLite implementation

mod repository;
mod schema;
mod sqlite;

pub use repository::{
    ContentInput, NewNote, NoteStore, NoteUpdate, StoreError, StoreResult, TagWithCount,
};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
