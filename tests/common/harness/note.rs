//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fastnote::domain::{OwnerId, Tag};
use fastnote::store::{ContentInput, NewNote};

/// Builder for creating test notes with sensible defaults.
///
/// Notes are markdown with no tags, stamped with the current time unless
/// a creation date is given.
#[derive(Debug)]
pub struct TestNote {
    body: String,
    tags: Vec<Tag>,
    created: Option<DateTime<Utc>>,
    sketch: Option<(String, Option<String>)>,
}

impl TestNote {
    /// Creates a new markdown test note with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            tags: Vec::new(),
            created: None,
            sketch: None,
        }
    }

    /// Creates a sketch test note.
    pub fn sketch(drawing: impl Into<String>, svg: Option<&str>) -> Self {
        Self {
            sketch: Some((drawing.into(), svg.map(str::to_string))),
            ..Self::new("")
        }
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.push(Tag::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Sets the creation time to midnight UTC of the given day.
    pub fn created(mut self, year: i32, month: u32, day: u32) -> Self {
        self.created = Some(
            Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .expect("Invalid date"),
        );
        self
    }

    /// Converts to a store insert for the given user.
    pub fn to_new_note(&self, owner: &OwnerId) -> NewNote {
        let content = match &self.sketch {
            Some((drawing, svg)) => ContentInput::Sketch {
                drawing: drawing.clone(),
                svg: svg.clone(),
            },
            None => ContentInput::Markdown(self.body.clone()),
        };
        let note = NewNote::new(owner.clone(), content, self.tags.clone());
        match self.created {
            Some(created) => note.created_at(created),
            None => note,
        }
    }
}
