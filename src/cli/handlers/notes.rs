//! Note command handlers (new, edit, show, rm).

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use std::process::Command;

use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::cli::{EditArgs, NewArgs, RemoveArgs, ShowArgs};
use crate::domain::{Note, NoteContent, OwnerId, join_tags, parse_tag_input};
use crate::store::{ContentInput, NewNote, NoteStore, NoteUpdate, StoreError};

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launches the configured editor command.
pub(crate) struct ConfiguredEditor<'a>(pub &'a Config);

impl EditorLauncher for ConfiguredEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        open_in_editor(path, &self.0.editor())
    }
}

/// Opens a file in an editor command such as `vi` or `code --wait`.
fn open_in_editor(path: &Path, editor: &str) -> Result<()> {
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Reads a sketch drawing and optional SVG preview from disk.
fn read_sketch(drawing: &Path, svg: Option<&Path>) -> Result<ContentInput> {
    let drawing = std::fs::read_to_string(drawing)
        .with_context(|| format!("failed to read drawing: {}", drawing.display()))?;
    let svg = svg
        .map(|p| {
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read SVG: {}", p.display()))
        })
        .transpose()?;
    Ok(ContentInput::Sketch { drawing, svg })
}

fn print_note_created(verb: &str, note: &Note, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}: {}", verb, note),
        OutputFormat::Json => {
            let out = Output::new(NoteDetail::from(note));
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

/// Creates a note from `new` arguments, reading markdown from `stdin` when
/// no content argument is given.
pub(crate) fn create_note<S: NoteStore + ?Sized>(
    args: &NewArgs,
    store: &mut S,
    owner: &OwnerId,
    stdin: &mut dyn Read,
) -> Result<Note> {
    let tags = args.tags.as_deref().map(parse_tag_input).unwrap_or_default();

    let content = match (&args.sketch, &args.content) {
        (Some(drawing), _) => read_sketch(drawing, args.svg.as_deref())?,
        (None, Some(text)) => ContentInput::Markdown(text.clone()),
        (None, None) => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read note content from stdin")?;
            ContentInput::Markdown(text)
        }
    };

    let note = store
        .create_note(NewNote::new(owner.clone(), content, tags))
        .context("failed to create note")?;
    Ok(note)
}

pub fn handle_new<S: NoteStore + ?Sized>(
    args: &NewArgs,
    store: &mut S,
    owner: &OwnerId,
) -> Result<()> {
    let note = create_note(args, store, owner, &mut std::io::stdin().lock())?;
    print_note_created("Created", &note, args.format)
}

/// Applies `edit` arguments to an existing note.
///
/// Tags are kept unless `--tags` is given. A markdown note with neither new
/// content nor new tags is opened in the editor.
pub(crate) fn edit_note<S: NoteStore + ?Sized, E: EditorLauncher>(
    args: &EditArgs,
    store: &mut S,
    owner: &OwnerId,
    editor: &E,
) -> Result<Note> {
    let Some(existing) = store.get_note(owner, args.id)? else {
        bail!("note not found: {}", args.id);
    };

    let tags = match &args.tags {
        Some(input) => parse_tag_input(input),
        None => existing.tags().to_vec(),
    };

    let content = match (existing.content(), &args.sketch, &args.content) {
        (NoteContent::Sketch { .. }, Some(drawing), _) => {
            read_sketch(drawing, args.svg.as_deref())?
        }
        (NoteContent::Markdown { .. }, Some(_), _) => {
            bail!("note {} is a markdown note; --sketch only applies to sketches", args.id)
        }
        (NoteContent::Sketch { .. }, None, Some(_)) => {
            bail!("note {} is a sketch; use --sketch to replace its drawing", args.id)
        }
        (NoteContent::Markdown { .. }, None, Some(text)) => ContentInput::Markdown(text.clone()),
        (NoteContent::Markdown { source, .. }, None, None) if args.tags.is_none() => {
            ContentInput::Markdown(edit_in_tempfile(source, editor)?)
        }
        (NoteContent::Markdown { source, .. }, None, None) => {
            ContentInput::Markdown(source.clone())
        }
        (NoteContent::Sketch { drawing, svg }, None, None) => {
            if args.tags.is_none() {
                bail!("nothing to change: give --tags or --sketch for sketch {}", args.id);
            }
            ContentInput::Sketch {
                drawing: drawing.clone(),
                svg: svg.clone(),
            }
        }
    };

    store
        .update_note(owner, args.id, NoteUpdate { tags, content })
        .map_err(|e| match e {
            StoreError::NoteNotFound { id } => anyhow::anyhow!("note not found: {}", id),
            other => anyhow::Error::new(other).context("failed to update note"),
        })
}

/// Round-trips markdown through the editor via a temporary file.
fn edit_in_tempfile<E: EditorLauncher>(source: &str, editor: &E) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("fastnote-")
        .suffix(".md")
        .tempfile()
        .context("failed to create temporary file")?;
    std::fs::write(file.path(), source)
        .with_context(|| format!("failed to write {}", file.path().display()))?;

    editor.open(file.path())?;

    std::fs::read_to_string(file.path())
        .with_context(|| format!("failed to read {}", file.path().display()))
}

pub fn handle_edit<S: NoteStore + ?Sized>(
    args: &EditArgs,
    store: &mut S,
    owner: &OwnerId,
    config: &Config,
) -> Result<()> {
    let note = edit_note(args, store, owner, &ConfiguredEditor(config))?;
    println!("Edited: {}", note);
    Ok(())
}

pub fn handle_show<S: NoteStore + ?Sized>(
    args: &ShowArgs,
    store: &S,
    owner: &OwnerId,
) -> Result<()> {
    let Some(note) = store.get_note(owner, args.id)? else {
        bail!("note not found: {}", args.id);
    };

    match args.format {
        OutputFormat::Human if args.html => match note.html() {
            Some(html) => println!("{}", html),
            None => bail!("sketch {} has no SVG preview", note.id()),
        },
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Type: {}  Created: {}  Modified: {}",
                note.id(),
                note.kind(),
                note.created().format("%Y-%m-%d %H:%M"),
                note.modified().format("%Y-%m-%d %H:%M")
            );
            if !note.tags().is_empty() {
                println!("Tags: {}", join_tags(note.tags()));
            }
            println!();

            match note.content() {
                NoteContent::Markdown { source, .. } => {
                    if !source.is_empty() {
                        println!("{}", source);
                    }
                }
                NoteContent::Sketch { svg, .. } => {
                    let preview = if svg.is_some() { "with" } else { "without" };
                    println!("(sketch {} SVG preview; use --html to print it)", preview);
                }
            }
        }
        OutputFormat::Json => {
            let mut detail = NoteDetail::from(&note);
            if !args.html {
                detail.html = None;
            }
            let out = Output::new(detail);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

pub fn handle_remove<S: NoteStore + ?Sized>(
    args: &RemoveArgs,
    store: &mut S,
    owner: &OwnerId,
) -> Result<()> {
    match store.delete_note(owner, args.id) {
        Ok(()) => {
            println!("Deleted: {}", args.id);
            Ok(())
        }
        Err(StoreError::NoteNotFound { id }) => bail!("note not found: {}", id),
        Err(e) => Err(e).context("failed to delete note"),
    }
}
