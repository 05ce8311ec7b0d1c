//! fastnote - tagged markdown notes and sketches with tag-aware search

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod search;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_completions, handle_edit, handle_export, handle_import, handle_list, handle_new,
        handle_remove, handle_search, handle_show, handle_tags,
    },
    logging,
};
use store::SqliteStore;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        handle_completions(args);
        return Ok(());
    }

    let config = Config::load()?;
    let db_path = config.database(cli.db.as_ref());
    let owner = config.owner(cli.user.as_deref())?;
    debug!(db = %db_path.display(), owner = %owner, "resolved configuration");

    let mut store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    match &cli.command {
        Command::New(args) => handle_new(args, &mut store, &owner),
        Command::Edit(args) => handle_edit(args, &mut store, &owner, &config),
        Command::Show(args) => handle_show(args, &store, &owner),
        Command::Remove(args) => handle_remove(args, &mut store, &owner),
        Command::List(args) => handle_list(args, &store, &owner),
        Command::Search(args) => handle_search(args, &store, &owner),
        Command::Tags(args) => handle_tags(args, &store, &owner),
        Command::Export(args) => handle_export(args, &store, &owner),
        Command::Import(args) => handle_import(args, &mut store, &owner),
        Command::Completions(args) => {
            handle_completions(args);
            Ok(())
        }
    }
}
