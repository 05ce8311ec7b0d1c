//! Applying a predicate to a note sequence.

use super::{Predicate, Searchable};
use std::cmp::Ordering;

/// Orders notes newest first by creation time.
pub fn newest_first<N: Searchable>(a: &N, b: &N) -> Ordering {
    b.created().cmp(&a.created())
}

/// Returns the notes matching `predicate`, newest first.
///
/// Notes created at the same instant keep their input order. Owner scoping is
/// the caller's job; every note given is evaluated.
pub fn evaluate<N, I>(predicate: &Predicate, notes: I) -> Vec<N>
where
    N: Searchable,
    I: IntoIterator<Item = N>,
{
    let mut matches: Vec<N> = notes
        .into_iter()
        .filter(|note| predicate.matches(note))
        .collect();
    // sort_by is stable, which keeps ties in input order
    matches.sort_by(newest_first);
    matches
}
