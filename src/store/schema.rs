//! SQLite schema creation for the note store.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the note store.
///
/// Idempotent: calling it on an existing database leaves data untouched.
///
/// # Tables Created
/// - `notes` - one row per note, scoped by `owner`
/// - `note_tags` - ordered tags of each note
/// - `schema_version` - schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // AUTOINCREMENT keeps ids strictly increasing even after deletes
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            note_type TEXT NOT NULL DEFAULT 'markdown',
            markdown_content TEXT,
            html_content TEXT,
            sketch_json TEXT,
            created TEXT NOT NULL,
            modified TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_tags (
            note_id INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (note_id, position)
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner);
         CREATE INDEX IF NOT EXISTS idx_note_tags_name ON note_tags(name);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |_| Ok(()),
        )
        .is_ok()
    }

    fn index_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?",
            [name],
            |_| Ok(()),
        )
        .is_ok()
    }

    fn column_names(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn creates_tables_and_indexes() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        assert!(table_exists(&conn, "notes"));
        assert!(table_exists(&conn, "note_tags"));
        assert!(table_exists(&conn, "schema_version"));
        assert!(index_exists(&conn, "idx_notes_owner"));
        assert!(index_exists(&conn, "idx_note_tags_name"));
    }

    #[test]
    fn notes_table_has_content_columns() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        let columns = column_names(&conn, "notes");
        for expected in [
            "id",
            "owner",
            "note_type",
            "markdown_content",
            "html_content",
            "sketch_json",
            "created",
            "modified",
        ] {
            assert!(
                columns.iter().any(|c| c == expected),
                "notes should have {} column",
                expected
            );
        }
    }

    #[test]
    fn deleting_note_cascades_to_tags() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO notes (owner, created, modified) VALUES ('ana', 'x', 'x')",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO note_tags (note_id, position, name) VALUES (?1, 0, 'work')",
            [id],
        )
        .unwrap();

        conn.execute("DELETE FROM notes WHERE id = ?1", [id]).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM note_tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn note_tags_fk_enforced() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO note_tags (note_id, position, name) VALUES (999, 0, 'orphan')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_schema_is_idempotent() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn create_schema_preserves_existing_data() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO notes (owner, created, modified) VALUES ('ana', 'x', 'x')",
            [],
        )
        .unwrap();

        create_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
