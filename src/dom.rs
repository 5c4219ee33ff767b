use scraper::{Html, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Markup tree stored as an arena; nodes refer to each other by index.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parses markup with html5ever and copies the resulting tree into the arena.
    ///
    /// Doctype and processing-instruction nodes are dropped.
    pub fn parse_html(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let mut document = Self::new();
        let root = document.root();

        let mut pending: Vec<_> = html
            .tree
            .root()
            .children()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((node, parent)) = pending.pop() {
            let id = match node.value() {
                Node::Element(element) => {
                    document.append_element(parent, element.name(), element.attrs())
                }
                Node::Text(text) => document.append_text(parent, &**text),
                Node::Comment(comment) => document.append_comment(parent, &**comment),
                _ => continue,
            };
            pending.extend(node.children().rev().map(|child| (child, id)));
        }

        document
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append_element<'a>(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> NodeId {
        let attrs = attrs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.push(
            parent,
            NodeKind::Element {
                name: name.to_string(),
                attrs,
            },
        )
    }

    #[cfg(test)]
    pub fn append_tag(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.append_element(parent, name, std::iter::empty::<(&str, &str)>())
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Comment(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    #[allow(dead_code)]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|sibling| *sibling == id)?;
        siblings.get(position + 1).copied()
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id) == Some(tag)
    }

    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }
}
