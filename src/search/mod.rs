//! Tag-aware note search: query parsing and evaluation

mod evaluate;
mod parser;
mod predicate;

pub use evaluate::{evaluate, newest_first};
pub use parser::parse;
pub use predicate::{Clause, Predicate, Searchable};

use crate::domain::{Note, NoteId, NoteKind, OwnerId, Tag};
use crate::store::{NoteStore, StoreResult};
use serde::Serialize;
use tracing::debug;

/// A search hit as returned to list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub tags: Vec<Tag>,
    pub note_type: NoteKind,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id(),
            title: note.title().to_string(),
            tags: note.tags().to_vec(),
            note_type: note.kind(),
        }
    }
}

/// Runs a raw query against one owner's notes.
///
/// Returns summaries newest first. An empty query lists every note.
pub fn search_notes<S: NoteStore + ?Sized>(
    store: &S,
    owner: &OwnerId,
    raw: &str,
) -> StoreResult<Vec<NoteSummary>> {
    let predicate = parse(raw);
    debug!(query = raw, predicate = %predicate, "parsed search query");

    let notes = store.list_notes(owner)?;
    let matches = evaluate(&predicate, &notes);
    debug!(owner = %owner, candidates = notes.len(), matches = matches.len(), "evaluated search");

    Ok(matches.into_iter().map(NoteSummary::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContentInput, NewNote, SqliteStore};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn owner(name: &str) -> OwnerId {
        OwnerId::new(name).unwrap()
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
    }

    fn add(store: &mut SqliteStore, who: &str, body: &str, tags: &[&str], minute: u32) -> NoteId {
        let tags = tags.iter().map(|t| Tag::new(t).unwrap()).collect();
        let note = NewNote::new(owner(who), ContentInput::Markdown(body.to_string()), tags)
            .created_at(at(minute));
        store.create_note(note).unwrap().id()
    }

    fn ids(summaries: &[NoteSummary]) -> Vec<NoteId> {
        summaries.iter().map(|s| s.id).collect()
    }

    #[test]
    fn empty_query_lists_owner_notes_newest_first() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let old = add(&mut store, "ana", "old", &[], 1);
        let new = add(&mut store, "ana", "new", &[], 5);
        add(&mut store, "bob", "not mine", &[], 9);

        let result = search_notes(&store, &owner("ana"), "").unwrap();
        assert_eq!(ids(&result), vec![new, old]);
    }

    #[test]
    fn search_is_scoped_to_owner() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mine = add(&mut store, "ana", "shared words", &["t"], 1);
        add(&mut store, "bob", "shared words", &["t"], 2);

        let result = search_notes(&store, &owner("ana"), "shared #t").unwrap();
        assert_eq!(ids(&result), vec![mine]);
    }

    #[test]
    fn combination_query_end_to_end() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let hit = add(&mut store, "ana", "design review", &["done", "urgent"], 1);
        add(&mut store, "ana", "design review", &["done"], 2);
        add(&mut store, "ana", "design review", &["urgent"], 3);
        add(&mut store, "ana", "planning", &["done", "blocked"], 4);

        let result = search_notes(&store, &owner("ana"), "design #done OR(#urgent,#blocked)")
            .unwrap();
        assert_eq!(ids(&result), vec![hit]);
    }

    #[test]
    fn summary_carries_title_tags_and_type() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = add(&mut store, "ana", "x", &["work"], 1);

        let result = search_notes(&store, &owner("ana"), "#work").unwrap();
        assert_eq!(
            result,
            vec![NoteSummary {
                id,
                title: "2024-06-01-work".to_string(),
                tags: vec![Tag::new("work").unwrap()],
                note_type: NoteKind::Markdown,
            }]
        );
    }

    #[test]
    fn summary_serializes_for_list_responses() {
        let summary = NoteSummary {
            id: NoteId::new(3),
            title: "2024-06-01-a".to_string(),
            tags: vec![Tag::new("a").unwrap()],
            note_type: NoteKind::Sketch,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "title": "2024-06-01-a",
                "tags": ["a"],
                "note_type": "excalidraw"
            })
        );
    }
}
