//! Export and import of notes as JSON.

mod json;

pub use json::{ExportError, ExportedNote, export_notes, import_notes, to_json};
