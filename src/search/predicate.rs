//! Parsed search predicates and the read contract they are evaluated against.

use crate::domain::{Note, Tag};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// Read-only view of a note as seen by the search core.
///
/// The evaluator only needs the text body, the tags and the creation time,
/// so anything exposing those can be searched.
pub trait Searchable {
    /// Searchable text, or `None` for notes without a text body.
    fn text_content(&self) -> Option<&str>;

    fn tags(&self) -> &[Tag];

    fn created(&self) -> DateTime<Utc>;
}

impl Searchable for Note {
    fn text_content(&self) -> Option<&str> {
        Note::text_content(self)
    }

    fn tags(&self) -> &[Tag] {
        Note::tags(self)
    }

    fn created(&self) -> DateTime<Utc> {
        Note::created(self)
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn text_content(&self) -> Option<&str> {
        (**self).text_content()
    }

    fn tags(&self) -> &[Tag] {
        (**self).tags()
    }

    fn created(&self) -> DateTime<Utc> {
        (**self).created()
    }
}

/// One condition of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
    /// Text body contains the substring (case-sensitive).
    Text(&'a str),
    /// Tags contain this exact tag.
    Tag(&'a Tag),
    /// Tags contain at least one of these.
    AnyTag(&'a BTreeSet<Tag>),
}

impl Clause<'_> {
    pub fn matches<N: Searchable + ?Sized>(&self, note: &N) -> bool {
        match self {
            Clause::Text(needle) => note
                .text_content()
                .is_some_and(|text| text.contains(needle)),
            Clause::Tag(tag) => note.tags().contains(tag),
            Clause::AnyTag(group) => note.tags().iter().any(|t| group.contains(t)),
        }
    }
}

/// A parsed search query: the conjunction of all its clauses.
///
/// Holds at most one text term, any number of required tags and any number
/// of `OR(...)` groups. A predicate with no clauses matches every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    text: Option<String>,
    required: Vec<Tag>,
    any_of: Vec<BTreeSet<Tag>>,
}

impl Predicate {
    /// The empty predicate.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Sets the substring the text body must contain.
    ///
    /// Blank terms are ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    /// Adds a tag the note must carry.
    pub fn require_tag(mut self, tag: Tag) -> Self {
        self.required.push(tag);
        self
    }

    /// Adds a group of tags of which the note must carry at least one.
    ///
    /// An empty group adds nothing.
    pub fn require_any(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        let group: BTreeSet<Tag> = tags.into_iter().collect();
        if !group.is_empty() {
            self.any_of.push(group);
        }
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn required_tags(&self) -> &[Tag] {
        &self.required
    }

    pub fn any_of_groups(&self) -> &[BTreeSet<Tag>] {
        &self.any_of
    }

    /// Returns true if the predicate has no clauses.
    pub fn is_match_all(&self) -> bool {
        self.text.is_none() && self.required.is_empty() && self.any_of.is_empty()
    }

    /// Iterates over all clauses: text first, then tags, then groups.
    pub fn clauses(&self) -> impl Iterator<Item = Clause<'_>> {
        self.text
            .as_deref()
            .map(Clause::Text)
            .into_iter()
            .chain(self.required.iter().map(Clause::Tag))
            .chain(self.any_of.iter().map(Clause::AnyTag))
    }

    /// Returns true if every clause matches the note.
    pub fn matches<N: Searchable + ?Sized>(&self, note: &N) -> bool {
        self.clauses().all(|clause| clause.matches(note))
    }
}

/// Renders the predicate back into the query language.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(text) = &self.text {
            parts.push(text.clone());
        }
        for tag in &self.required {
            parts.push(format!("#{}", tag));
        }
        for group in &self.any_of {
            let inner: Vec<String> = group.iter().map(|t| format!("#{}", t)).collect();
            parts.push(format!("OR({})", inner.join(",")));
        }
        write!(f, "{}", parts.join(" "))
    }
}
