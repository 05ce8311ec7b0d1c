//! Case-sensitive tag type and the `#tag, #tag` input format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A case-sensitive label attached to a note.
///
/// Users write tags with a leading `#`; the stored value never carries it.
/// Tags are compared exactly, so `Work` and `work` are different tags.
///
/// # Validation Rules
/// - Non-empty after normalization
/// - Must not contain a comma (commas delimit tags in the input format)
///
/// # Normalization
/// - Surrounding whitespace is trimmed
/// - A single leading `#` is stripped
///
/// # Examples
///
/// ```
/// use fastnote::domain::Tag;
///
/// let tag = Tag::new("#work").unwrap();
/// assert_eq!(tag.as_str(), "work");
/// assert_ne!(tag, Tag::new("Work").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if:
    /// - The tag is empty or whitespace-only (after stripping `#`)
    /// - The tag contains a comma
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();
        let normalized = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if normalized.contains(',') {
            return Err(ParseTagError(format!(
                "invalid tag '{}': tags cannot contain commas",
                normalized
            )));
        }

        Ok(Self(normalized.to_string()))
    }

    /// Returns the tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parses the comma-separated tag field of the note form.
///
/// Only pieces that start with `#` (after trimming) and carry at least one
/// more character are accepted; everything else is dropped without error.
/// Duplicates keep their first position.
///
/// ```
/// use fastnote::domain::parse_tag_input;
///
/// let tags = parse_tag_input("#rust, notes, #cli tools");
/// let names: Vec<_> = tags.iter().map(|t| t.as_str()).collect();
/// assert_eq!(names, vec!["rust", "cli tools"]);
/// ```
pub fn parse_tag_input(input: &str) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    for piece in input.split(',') {
        let piece = piece.trim();
        if !piece.starts_with('#') || piece.len() < 2 {
            continue;
        }
        if let Ok(tag) = Tag::new(piece)
            && !tags.contains(&tag)
        {
            tags.push(tag);
        }
    }
    tags
}

/// Joins tags back into their stored, comma-delimited form.
pub fn join_tags(tags: &[Tag]) -> String {
    tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(",")
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
