//! Isolated test environment with temp directory.

use super::{FastnoteCommand, TestNote};
use fastnote::domain::{NoteId, OwnerId};
use fastnote::store::{NoteStore, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// User the environment acts as unless told otherwise.
pub const DEFAULT_TEST_USER: &str = "tester";

/// Isolated test environment with a temporary database.
///
/// The temp directory also serves as the config and data home, so a
/// developer's own config file never leaks into a test run.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the temp directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the database path used by commands from this environment.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("notes.db")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open store")
    }

    /// Adds a note for the default test user and returns its id.
    pub fn add_note(&self, note: &TestNote) -> NoteId {
        self.add_note_for(DEFAULT_TEST_USER, note)
    }

    /// Adds a note for a specific user and returns its id.
    pub fn add_note_for(&self, user: &str, note: &TestNote) -> NoteId {
        let owner = OwnerId::new(user).expect("Invalid user");
        self.store()
            .create_note(note.to_new_note(&owner))
            .expect("Failed to create note")
            .id()
    }

    /// Creates a command acting as the default test user.
    pub fn cmd(&self) -> FastnoteCommand {
        self.cmd_as(DEFAULT_TEST_USER)
    }

    /// Creates a command acting as the given user.
    pub fn cmd_as(&self, user: &str) -> FastnoteCommand {
        FastnoteCommand::new()
            .home(&self.root)
            .db(&self.db_path())
            .user(user)
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
