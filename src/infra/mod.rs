//! Rendering helpers shared by the store and the CLI

mod markdown;

pub use markdown::markdown_to_html;
