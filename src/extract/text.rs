use crate::dom::{Document, NodeId, NodeKind};

use super::FOOTNOTE_MARKER_TAG;

/// Flattened, trimmed text of everything below `id`, minus footnote markers.
///
/// Falls back to the node's own character data when no descendant text exists,
/// which is what makes a bare text node flatten to itself.
pub fn collect_text(document: &Document, id: NodeId) -> String {
    let mut buffer = String::new();
    append_descendant_text(document, id, &mut buffer);

    if buffer.is_empty() {
        return match document.kind(id) {
            NodeKind::Text(data) => data.trim().to_string(),
            _ => String::new(),
        };
    }

    buffer.trim().to_string()
}

fn append_descendant_text(document: &Document, id: NodeId, buffer: &mut String) {
    for &child in document.children(id) {
        match document.kind(child) {
            NodeKind::Text(data) => buffer.push_str(data),
            NodeKind::Element { name, .. } if name != FOOTNOTE_MARKER_TAG => {
                append_descendant_text(document, child, buffer);
            }
            _ => {}
        }
    }
}
