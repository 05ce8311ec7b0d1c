//! NoteStore trait implementation for SqliteStore.

use super::{SqliteStore, Transaction};
use crate::domain::{Note, NoteContent, NoteId, NoteKind, OwnerId, Tag};
use crate::infra::markdown_to_html;
use crate::store::{
    ContentInput, NewNote, NoteStore, NoteUpdate, StoreError, StoreResult, TagWithCount,
};
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};
use std::collections::HashMap;
use tracing::{debug, info};

const NOTE_COLUMNS: &str =
    "id, owner, note_type, markdown_content, html_content, sketch_json, created, modified";

/// A `notes` row before tags are attached.
struct NoteRow {
    id: i64,
    owner: String,
    note_type: String,
    markdown: Option<String>,
    html: Option<String>,
    sketch: Option<String>,
    created: String,
    modified: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            note_type: row.get(2)?,
            markdown: row.get(3)?,
            html: row.get(4)?,
            sketch: row.get(5)?,
            created: row.get(6)?,
            modified: row.get(7)?,
        })
    }

    fn into_note(self, tags: Vec<Tag>) -> StoreResult<Note> {
        let kind: NoteKind = self
            .note_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("note {}: {}", self.id, e)))?;
        let owner = OwnerId::new(&self.owner)
            .map_err(|e| StoreError::Corrupt(format!("note {}: {}", self.id, e)))?;
        let created = parse_timestamp(self.id, &self.created)?;
        let modified = parse_timestamp(self.id, &self.modified)?;

        let content = match kind {
            NoteKind::Markdown => NoteContent::Markdown {
                source: self.markdown.unwrap_or_default(),
                html: self.html.unwrap_or_default(),
            },
            NoteKind::Sketch => NoteContent::Sketch {
                drawing: self.sketch.unwrap_or_default(),
                svg: self.html,
            },
        };

        Ok(Note::builder(NoteId::new(self.id), owner, content, created, modified)
            .tags(tags)
            .build())
    }
}

fn parse_timestamp(id: i64, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("note {}: invalid timestamp '{}': {}", id, value, e)))
}

/// Renders user input into stored content.
fn render_content(input: ContentInput) -> NoteContent {
    match input {
        ContentInput::Markdown(source) => {
            let html = markdown_to_html(&source);
            NoteContent::Markdown { source, html }
        }
        ContentInput::Sketch { drawing, svg } => NoteContent::Sketch { drawing, svg },
    }
}

/// Splits content into the `markdown_content`, `html_content` and `sketch_json` columns.
fn content_columns(content: &NoteContent) -> (Option<&str>, Option<&str>, Option<&str>) {
    match content {
        NoteContent::Markdown { source, html } => (Some(source.as_str()), Some(html.as_str()), None),
        NoteContent::Sketch { drawing, svg } => (None, svg.as_deref(), Some(drawing.as_str())),
    }
}

fn write_tags(tx: &Transaction<'_>, id: NoteId, tags: &[Tag]) -> StoreResult<()> {
    tx.execute("DELETE FROM note_tags WHERE note_id = ?1", [id.get()])?;
    for (position, tag) in tags.iter().enumerate() {
        tx.execute(
            "INSERT INTO note_tags (note_id, position, name) VALUES (?1, ?2, ?3)",
            params![id.get(), position as i64, tag.as_str()],
        )?;
    }
    Ok(())
}

impl SqliteStore {
    fn tags_for(&self, id: NoteId) -> StoreResult<Vec<Tag>> {
        let tags = self
            .conn
            .prepare("SELECT name FROM note_tags WHERE note_id = ?1 ORDER BY position")?
            .query_map([id.get()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .filter_map(|name| Tag::new(&name).ok())
            .collect();
        Ok(tags)
    }

    /// Tags of every note of an owner, keyed by note id.
    fn tags_by_note(&self, owner: &OwnerId) -> StoreResult<HashMap<i64, Vec<Tag>>> {
        let mut stmt = self.conn.prepare(
            "SELECT nt.note_id, nt.name FROM note_tags nt
             JOIN notes n ON n.id = nt.note_id
             WHERE n.owner = ?1
             ORDER BY nt.note_id, nt.position",
        )?;
        let rows = stmt.query_map([owner.as_str()], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut by_note: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            let (note_id, name) = row?;
            if let Ok(tag) = Tag::new(&name) {
                by_note.entry(note_id).or_default().push(tag);
            }
        }
        Ok(by_note)
    }
}

/// Inserts one note and its tags inside an open transaction.
fn insert_note(tx: &Transaction<'_>, note: NewNote) -> StoreResult<Note> {
    let created = note.created.unwrap_or_else(Utc::now);
    let modified = note.modified.unwrap_or(created);
    let content = render_content(note.content);
    let (markdown, html, sketch) = content_columns(&content);

    tx.execute(
        "INSERT INTO notes (owner, note_type, markdown_content, html_content, sketch_json, created, modified)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            note.owner.as_str(),
            content.kind().as_str(),
            markdown,
            html,
            sketch,
            created.to_rfc3339(),
            modified.to_rfc3339(),
        ],
    )?;
    let id = NoteId::new(tx.last_insert_rowid());

    let stored = Note::builder(id, note.owner, content, created, modified)
        .tags(note.tags)
        .build();
    write_tags(tx, id, stored.tags())?;
    Ok(stored)
}

impl NoteStore for SqliteStore {
    fn create_note(&mut self, note: NewNote) -> StoreResult<Note> {
        let tx = self.transaction()?;
        let stored = insert_note(&tx, note)?;
        tx.commit()?;

        info!(id = %stored.id(), owner = %stored.owner(), kind = %stored.kind(), "created note");
        Ok(stored)
    }

    fn create_notes(&mut self, notes: Vec<NewNote>) -> StoreResult<Vec<Note>> {
        let tx = self.transaction()?;
        let stored = notes
            .into_iter()
            .map(|note| insert_note(&tx, note))
            .collect::<StoreResult<Vec<_>>>()?;
        tx.commit()?;

        info!(count = stored.len(), "created notes");
        Ok(stored)
    }

    fn update_note(
        &mut self,
        owner: &OwnerId,
        id: NoteId,
        update: NoteUpdate,
    ) -> StoreResult<Note> {
        let existing = self
            .get_note(owner, id)?
            .ok_or(StoreError::NoteNotFound { id })?;

        if existing.kind() != update.content.kind() {
            return Err(StoreError::Validation(format!(
                "cannot replace {} note {} with {} content",
                existing.kind(),
                id,
                update.content.kind()
            )));
        }

        let modified = Utc::now().max(existing.created());
        let content = render_content(update.content);
        let (markdown, html, sketch) = content_columns(&content);

        let tx = self.transaction()?;
        tx.execute(
            "UPDATE notes
             SET markdown_content = ?1, html_content = ?2, sketch_json = ?3, modified = ?4
             WHERE id = ?5 AND owner = ?6",
            params![
                markdown,
                html,
                sketch,
                modified.to_rfc3339(),
                id.get(),
                owner.as_str(),
            ],
        )?;

        let updated = Note::builder(id, owner.clone(), content, existing.created(), modified)
            .tags(update.tags)
            .build();
        write_tags(&tx, id, updated.tags())?;
        tx.commit()?;

        info!(id = %id, owner = %owner, "updated note");
        Ok(updated)
    }

    fn get_note(&self, owner: &OwnerId, id: NoteId) -> StoreResult<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE id = ?1 AND owner = ?2", NOTE_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id.get(), owner.as_str()], NoteRow::from_row);

        let row = match row {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(StoreError::Database(e)),
        };

        let tags = self.tags_for(id)?;
        row.into_note(tags).map(Some)
    }

    fn delete_note(&mut self, owner: &OwnerId, id: NoteId) -> StoreResult<()> {
        let affected = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner = ?2",
            params![id.get(), owner.as_str()],
        )?;
        if affected == 0 {
            return Err(StoreError::NoteNotFound { id });
        }
        info!(id = %id, owner = %owner, "deleted note");
        Ok(())
    }

    fn list_notes(&self, owner: &OwnerId) -> StoreResult<Vec<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE owner = ?1 ORDER BY id", NOTE_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([owner.as_str()], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tags = self.tags_by_note(owner)?;
        let notes = rows
            .into_iter()
            .map(|row| {
                let note_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_note(note_tags)
            })
            .collect::<StoreResult<Vec<_>>>()?;

        debug!(owner = %owner, count = notes.len(), "listed notes");
        Ok(notes)
    }

    fn all_tags(&self, owner: &OwnerId) -> StoreResult<Vec<TagWithCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT nt.name, COUNT(DISTINCT nt.note_id) FROM note_tags nt
             JOIN notes n ON n.id = nt.note_id
             WHERE n.owner = ?1
             GROUP BY nt.name
             ORDER BY nt.name",
        )?;
        let rows = stmt.query_map([owner.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut tags = Vec::new();
        for row in rows {
            let (name, count) = row?;
            if let Ok(tag) = Tag::new(&name) {
                tags.push(TagWithCount::new(tag, count));
            }
        }
        Ok(tags)
    }
}
