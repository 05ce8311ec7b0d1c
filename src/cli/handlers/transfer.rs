//! Export and import command handlers.

use anyhow::{Context, Result};

use crate::cli::{ExportArgs, ImportArgs};
use crate::domain::OwnerId;
use crate::export::{export_notes, import_notes, to_json};
use crate::store::NoteStore;

pub fn handle_export<S: NoteStore + ?Sized>(
    args: &ExportArgs,
    store: &S,
    owner: &OwnerId,
) -> Result<()> {
    let notes = export_notes(store, owner).context("failed to export notes")?;
    let json = to_json(&notes)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            println!("Exported {} note(s) to {}", notes.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn handle_import<S: NoteStore + ?Sized>(
    args: &ImportArgs,
    store: &mut S,
    owner: &OwnerId,
) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let count = import_notes(store, owner, &json)
        .with_context(|| format!("failed to import {}", args.file.display()))?;
    println!("Imported {} note(s)", count);
    Ok(())
}
