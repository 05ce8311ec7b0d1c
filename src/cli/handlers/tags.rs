//! Tags command handler.

use anyhow::{Context, Result};

use crate::cli::TagsArgs;
use crate::cli::output::{Output, OutputFormat, TagListing};
use crate::domain::OwnerId;
use crate::store::NoteStore;

pub fn handle_tags<S: NoteStore + ?Sized>(
    args: &TagsArgs,
    store: &S,
    owner: &OwnerId,
) -> Result<()> {
    let tags = store.all_tags(owner).context("failed to list tags")?;

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for t in &tags {
                    if args.counts {
                        println!("#{} ({})", t.tag(), t.count());
                    } else {
                        println!("#{}", t.tag());
                    }
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|t| TagListing {
                    name: t.tag().to_string(),
                    count: args.counts.then(|| t.count()),
                })
                .collect();
            let out = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
