//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::NoteId;
use output::OutputFormat;

/// fastnote - tagged markdown notes and sketches with tag-aware search
#[derive(Parser, Debug)]
#[command(name = "fastnote", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Act as this user (overrides config file and $USER)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Replace a note's content and tags
    Edit(EditArgs),

    /// Show a note
    Show(ShowArgs),

    /// Delete a note
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// List notes, newest first
    #[command(name = "ls")]
    List(ListArgs),

    /// Search notes by words and tags
    ///
    /// Words must appear in the note text. `#tag` requires a tag,
    /// `OR(#a,#b)` requires at least one of the listed tags.
    Search(SearchArgs),

    /// List all tags
    Tags(TagsArgs),

    /// Export all notes as JSON
    Export(ExportArgs),

    /// Import notes from a JSON export
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Markdown content (read from stdin if omitted)
    pub content: Option<String>,

    /// Tags as `#tag` entries separated by commas, e.g. "#work, #ideas"
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Create a sketch from a drawing file instead of a markdown note
    #[arg(long, conflicts_with = "content")]
    pub sketch: Option<PathBuf>,

    /// SVG preview of the sketch
    #[arg(long, requires = "sketch")]
    pub svg: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: NoteId,

    /// New markdown content (opens the editor if omitted)
    pub content: Option<String>,

    /// Replacement tags, e.g. "#work, #ideas" (kept if omitted)
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Replacement drawing file for a sketch
    #[arg(long, conflicts_with = "content")]
    pub sketch: Option<PathBuf>,

    /// Replacement SVG preview for a sketch
    #[arg(long, requires = "sketch")]
    pub svg: Option<PathBuf>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: NoteId,

    /// Print the rendered HTML (or SVG for sketches)
    #[arg(long)]
    pub html: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note ID
    pub id: NoteId,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "design #done OR(#urgent,#blocked)"
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON file produced by `export`
    pub file: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
