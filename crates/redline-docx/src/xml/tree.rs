use super::names::{self, XName};

/// Stable handle to a node in a [`DocumentTree`].
///
/// Handles stay valid for the life of the tree. A removed node keeps its
/// handle but is no longer reachable from the root (see
/// [`DocumentTree::is_attached`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Qualified name as found in (or written to) the serialized part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Resolved namespace URI; `None` for unqualified names.
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
}

impl Name {
    #[must_use]
    pub fn is(&self, name: XName) -> bool {
        self.local == name.local && self.namespace.as_deref().unwrap_or("") == name.namespace
    }

    /// `prefix:local`, or just `local` when unprefixed.
    #[must_use]
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

impl Attribute {
    /// `xmlns` or `xmlns:prefix`.
    #[must_use]
    pub fn is_namespace_declaration(&self) -> bool {
        match self.name.prefix.as_deref() {
            Some(prefix) => prefix == "xmlns",
            None => self.name.local == "xmlns",
        }
    }

    /// Prefix bound by this declaration (`None` for the default namespace).
    fn declared_prefix(&self) -> Option<&str> {
        self.name.prefix.as_ref().map(|_| self.name.local.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: Name,
    pub attributes: Vec<Attribute>,
}

impl Element {
    #[must_use]
    pub fn attribute(&self, name: XName) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|attr| !attr.is_namespace_declaration())
            .find(|attr| attr.name.is(name))
            .map(|attr| attr.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered element tree of one XML part.
///
/// Child order is preserved by every mutation. Each node has at most one
/// parent; the root has none.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DocumentTree {
    /// New tree whose root element is `name`, declaring its namespace.
    #[must_use]
    pub fn with_root(name: XName) -> Self {
        let mut tree = Self::from_root_element(Element {
            name: Name {
                namespace: None,
                prefix: None,
                local: name.local.to_string(),
            },
            attributes: Vec::new(),
        });
        let root = tree.root;
        tree.rename(root, name);
        tree
    }

    pub(crate) fn from_root_element(element: Element) -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Element(element),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) | NodeData::Comment(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) | NodeData::Comment(_) => None,
        }
    }

    #[must_use]
    pub fn is(&self, id: NodeId, name: XName) -> bool {
        self.element(id).is_some_and(|element| element.name.is(name))
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: XName) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    /// Whether the node is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendant elements of `id` named `name`, in document order.
    #[must_use]
    pub fn find_all(&self, id: NodeId, name: XName) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|node| self.is(*node, name))
            .collect()
    }

    #[must_use]
    pub fn find_first(&self, id: NodeId, name: XName) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|node| self.is(*node, name))
    }

    /// Direct children of `id` named `name`.
    #[must_use]
    pub fn child_elements(&self, id: NodeId, name: XName) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is(*child, name))
            .collect()
    }

    /// Nearest proper ancestor of `id` named `name`.
    #[must_use]
    pub fn ancestor(&self, id: NodeId, name: XName) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.is(node, name) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Concatenated text of every `leaves` element at or under `id`.
    #[must_use]
    pub fn text(&self, id: NodeId, leaves: &[XName]) -> String {
        let mut out = String::new();
        let nodes = std::iter::once(id).chain(self.descendants(id));
        for node in nodes {
            if !leaves.iter().any(|leaf| self.is(node, *leaf)) {
                continue;
            }
            for child in self.children(node) {
                if let NodeData::Text(value) = self.data(*child) {
                    out.push_str(value);
                }
            }
        }
        out
    }

    /// Allocate a detached element named `name`.
    ///
    /// The prefix is whatever the root binds to the namespace; a binding is
    /// declared on the root when none exists.
    pub fn create_element(&mut self, name: XName) -> NodeId {
        let name = self.bound_name(name);
        self.alloc(NodeData::Element(Element {
            name,
            attributes: Vec::new(),
        }))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, value: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(value.into()))
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Set (or overwrite) an attribute on an element. No-op on non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: XName, value: impl Into<String>) {
        let value = value.into();
        if self.element(id).is_none() {
            return;
        }
        let bound = self.bound_name(name);
        if let Some(element) = self.element_mut(id) {
            if let Some(existing) = element
                .attributes
                .iter_mut()
                .filter(|attr| !attr.is_namespace_declaration())
                .find(|attr| attr.name.is(name))
            {
                existing.value = value;
            } else {
                element.attributes.push(Attribute { name: bound, value });
            }
        }
    }

    /// Give an element a new name, keeping attributes and children.
    pub fn rename(&mut self, id: NodeId, name: XName) {
        let bound = self.bound_name(name);
        if let Some(element) = self.element_mut(id) {
            element.name = bound;
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `node` into the parent of `reference`, right before it.
    ///
    /// Returns `false` (and does nothing) when `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> bool {
        if node == reference {
            return false;
        }
        self.detach(node);
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        let Some(index) = self.position(parent, reference) else {
            return false;
        };
        self.nodes[parent.0].children.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
        true
    }

    /// Detach `id` (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Replace `id` by its own children, in order, then remove `id`.
    ///
    /// Returns `false` when `id` has no parent.
    pub fn unwrap(&mut self, id: NodeId) -> bool {
        if self.parent(id).is_none() {
            return false;
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.insert_before(id, child);
        }
        self.remove(id);
        true
    }

    /// Drop every current child of `id` and adopt `children` in their place.
    pub fn replace_children_with(&mut self, id: NodeId, children: Vec<NodeId>) {
        for old in self.children(id).to_vec() {
            self.detach(old);
        }
        for child in children {
            self.append_child(id, child);
        }
    }

    fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|c| *c == child)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn bound_name(&mut self, name: XName) -> Name {
        let prefix = if name.namespace.is_empty() {
            None
        } else {
            self.ensure_binding(name.namespace)
        };
        Name {
            namespace: (!name.namespace.is_empty()).then(|| name.namespace.to_string()),
            prefix,
            local: name.local.to_string(),
        }
    }

    /// Prefix bound to `namespace` on the root, declaring one if needed.
    fn ensure_binding(&mut self, namespace: &str) -> Option<String> {
        if namespace == names::XML {
            return Some(String::from("xml"));
        }
        let root = self.root;
        let declarations: Vec<(Option<String>, String)> = self
            .element(root)
            .map(|element| {
                element
                    .attributes
                    .iter()
                    .filter(|attr| attr.is_namespace_declaration())
                    .map(|attr| {
                        (
                            attr.declared_prefix().map(str::to_string),
                            attr.value.clone(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((prefix, _)) = declarations.iter().find(|(_, uri)| uri == namespace) {
            return prefix.clone();
        }

        let root_name_matches = self
            .element(root)
            .is_some_and(|element| element.name.namespace.as_deref() == Some(namespace));
        if root_name_matches {
            if let Some(element) = self.element(root) {
                return element.name.prefix.clone();
            }
        }

        let taken = |candidate: &Option<String>| declarations.iter().any(|(p, _)| p == candidate);
        let mut prefix = names::preferred_prefix(namespace).map(str::to_string);
        if taken(&prefix) {
            prefix = None;
        }
        if prefix.is_none() && taken(&None) {
            let mut n = 0usize;
            prefix = loop {
                let candidate = Some(format!("ns{n}"));
                if !taken(&candidate) {
                    break candidate;
                }
                n += 1;
            };
        }

        let declaration = Attribute {
            name: match &prefix {
                Some(p) => Name {
                    namespace: None,
                    prefix: Some(String::from("xmlns")),
                    local: p.clone(),
                },
                None => Name {
                    namespace: None,
                    prefix: None,
                    local: String::from("xmlns"),
                },
            },
            value: namespace.to_string(),
        };
        if let Some(element) = self.element_mut(root) {
            element.attributes.insert(0, declaration);
        }
        prefix
    }
}
