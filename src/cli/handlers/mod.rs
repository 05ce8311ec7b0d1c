//! Command handlers for the CLI.

mod notes;
mod search;
mod tags;
mod transfer;


use clap::CommandFactory;
use clap_complete::generate;

use super::{Cli, CompletionsArgs};

// Re-export public items
pub use notes::{handle_edit, handle_new, handle_remove, handle_show};
pub use search::{handle_list, handle_search};
pub use tags::handle_tags;
pub use transfer::{handle_export, handle_import};

// Re-export for tests
#[cfg(test)]
pub(crate) use notes::{EditorLauncher, create_note, edit_note};

pub fn handle_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut std::io::stdout());
}

// ===========================================
// Shared Utilities
// ===========================================

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
