mod catalog;
mod labels;
mod records;
mod text;
mod walk;

pub use catalog::build_catalog;
pub use labels::document_revision;

/// Inline citation marker; its subtree never contributes text.
pub const FOOTNOTE_MARKER_TAG: &str = "sup";
