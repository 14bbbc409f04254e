//! Lightweight view-node tree.
//!
//! Components render into plain [`Node`] values instead of a real DOM, so
//! functional contracts (disabled controls, error messages, what the
//! overlay holds) stay observable in tests without a browser. Nodes are
//! cheap to build, compare, and walk; nothing here retains state between
//! renders.

/// Vocabulary of node kinds the components render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Toolbar,
    Heading,
    Paragraph,
    List,
    ListItem,
    Tag,
    Button,
    TextInput,
    TextArea,
    Select,
    SelectOption,
    Label,
    Form,
    Field,
    FieldError,
    Backdrop,
    Dialog,
    Pagination,
    Status,
}

/// One node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub id: Option<String>,
    pub text: Option<String>,
    pub disabled: bool,
    pub active: bool,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            text: None,
            disabled: false,
            active: false,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Depth-first search by id, this node included.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Every node of the given kind, in render order, this node included.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_kind(kind, &mut found);
        found
    }

    fn collect_kind<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a Node>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.collect_kind(kind, found);
        }
    }

    /// True if any node in the subtree has text containing `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        if self.text.as_deref().is_some_and(|t| t.contains(needle)) {
            return true;
        }
        self.children.iter().any(|child| child.contains_text(needle))
    }
}

/// A full rendered frame: the page body plus the detached overlay mount.
///
/// The overlay holds the dialog subtree while one is open and is an empty
/// container otherwise; closed dialogs leave nothing behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub body: Node,
    pub overlay: Node,
}

impl Screen {
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.body.find(id).or_else(|| self.overlay.find(id))
    }

    pub fn find_all(&self, kind: NodeKind) -> Vec<&Node> {
        let mut found = self.body.find_all(kind);
        found.extend(self.overlay.find_all(kind));
        found
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.body.contains_text(needle) || self.overlay.contains_text(needle)
    }

    pub fn overlay_is_empty(&self) -> bool {
        self.overlay.children.is_empty()
    }
}
