//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `fastnote` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct FastnoteCommand {
    args: Vec<String>,
    home: Option<PathBuf>,
    stdin: Option<String>,
}

impl FastnoteCommand {
    /// Creates a new command for the `fastnote` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            home: None,
            stdin: None,
        }
    }

    /// Points config and data lookups at the given directory.
    pub fn home(mut self, path: &Path) -> Self {
        self.home = Some(path.to_path_buf());
        self
    }

    /// Sets the `--db` option.
    pub fn db(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        self.args(["--db", path.as_str()])
    }

    /// Sets the `--user` option.
    pub fn user(self, name: &str) -> Self {
        self.args(["--user", name])
    }

    /// Feeds the given text on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("fastnote").expect("Failed to find fastnote binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        if let Some(home) = &self.home {
            cmd.env("XDG_CONFIG_HOME", home.join("config"))
                .env("XDG_DATA_HOME", home.join("data-home"))
                .env("HOME", home);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `new` command with markdown content.
    pub fn new_note(self, content: &str) -> Self {
        self.args(["new", content])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for the `show` command with an ID.
    pub fn show(self, id: impl ToString) -> Self {
        self.args(["show".to_string(), id.to_string()])
    }

    /// Configures for the `rm` command with an ID.
    pub fn rm(self, id: impl ToString) -> Self {
        self.args(["rm".to_string(), id.to_string()])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for FastnoteCommand {
    fn default() -> Self {
        Self::new()
    }
}
