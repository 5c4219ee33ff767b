use crate::dom::{Document, NodeId};

use super::text::collect_text;
use super::walk::elements;

const REVISION_ATTRIBUTE: &str = "about";

/// Revision number encoded as the final path segment of the `about` attribute.
///
/// Missing attribute or a non-numeric segment yields 0.
pub fn revision_of(document: &Document, html: NodeId) -> u64 {
    document
        .attrs(html)
        .iter()
        .find(|(key, _)| key == REVISION_ATTRIBUTE)
        .and_then(|(_, value)| last_path_segment(value).parse::<u64>().ok())
        .unwrap_or(0)
}

/// Revision of the first `html` element in the document, 0 if there is none.
pub fn document_revision(document: &Document) -> u64 {
    elements(document, document.root())
        .find(|id| document.is_element(*id, "html"))
        .map(|html| revision_of(document, html))
        .unwrap_or(0)
}

/// Label of a definition list: the text of its parent's first child.
///
/// Relies on the heading being the first node of the wrapping section. A
/// leading whitespace text node or any other markup there produces a wrong
/// or empty label.
pub fn group_label(document: &Document, list: NodeId) -> String {
    document
        .parent(list)
        .and_then(|parent| document.children(parent).first().copied())
        .map(|first| collect_text(document, first))
        .unwrap_or_default()
}

fn last_path_segment(value: &str) -> &str {
    let trimmed = value.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
