//! Identifier of the user who owns a note.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The owner of a set of notes.
///
/// Owners are opaque to the search core; the store uses them to scope every
/// read and write to a single user.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

/// Error returned when an owner identifier is blank.
#[derive(Debug, Clone)]
pub struct ParseOwnerIdError;

impl fmt::Display for ParseOwnerIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner cannot be empty")
    }
}

impl std::error::Error for ParseOwnerIdError {}

impl OwnerId {
    /// Creates an owner id from a username, trimming surrounding whitespace.
    pub fn new(s: &str) -> Result<Self, ParseOwnerIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseOwnerIdError);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerId(\"{}\")", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = ParseOwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = ParseOwnerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}
