//! List and search command handlers.

use anyhow::{Context, Result};

use super::truncate_str;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{ListArgs, SearchArgs};
use crate::domain::{OwnerId, join_tags};
use crate::search::{NoteSummary, search_notes};
use crate::store::NoteStore;

pub fn handle_list<S: NoteStore + ?Sized>(
    args: &ListArgs,
    store: &S,
    owner: &OwnerId,
) -> Result<()> {
    let notes = search_notes(store, owner, "").context("failed to list notes")?;
    print_summaries(&notes, args.format, "No notes found.")
}

pub fn handle_search<S: NoteStore + ?Sized>(
    args: &SearchArgs,
    store: &S,
    owner: &OwnerId,
) -> Result<()> {
    let notes = search_notes(store, owner, &args.query)
        .with_context(|| format!("search failed for query: {}", args.query))?;
    print_summaries(&notes, args.format, "No matching notes found.")
}

fn print_summaries(notes: &[NoteSummary], format: OutputFormat, empty: &str) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("{}", empty);
                return Ok(());
            }

            println!("{:>6}  {:<40}  {:<10}  {}", "ID", "Title", "Type", "Tags");
            println!(
                "{:>6}  {:<40}  {:<10}  {}",
                "------", "----------------------------------------", "----------", "----"
            );
            for note in notes {
                println!(
                    "{:>6}  {:<40}  {:<10}  {}",
                    note.id,
                    truncate_str(&note.title, 40),
                    note.note_type.as_str(),
                    join_tags(&note.tags)
                );
            }
            println!();
            println!("{} note(s)", notes.len());
        }
        OutputFormat::Json => {
            let output = Output::new(notes);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
