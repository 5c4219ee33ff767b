use crate::dom::{Document, NodeId, NodeKind};

/// Depth-first, pre-order iterator over the element nodes below (and including) a root.
///
/// Dropping the iterator ends the traversal; no state outlives it.
pub struct Elements<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

pub fn elements(document: &Document, root: NodeId) -> Elements<'_> {
    Elements {
        document,
        stack: vec![root],
    }
}

impl Iterator for Elements<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            self.stack
                .extend(self.document.children(id).iter().rev().copied());
            if matches!(self.document.kind(id), NodeKind::Element { .. }) {
                return Some(id);
            }
        }
        None
    }
}
