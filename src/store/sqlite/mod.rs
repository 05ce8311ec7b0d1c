//! SQLite-backed note store.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed note store.
///
/// Owns a single connection. Every read and write is scoped to one owner.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
