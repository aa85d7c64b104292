//! Arena-backed filter tree.
//!
//! Nodes live in a `Vec` owned by [`FilterTree`] and refer to their children
//! by [`NodeId`]. Children are keyed by field name in a `BTreeMap`, so they
//! always iterate in lexicographic order. The canonical string form depends on
//! that order.
//!
//! Read access goes through [`NodeRef`], a borrowed view of one node and its
//! subtree.

use std::collections::BTreeMap;
use std::fmt;

/// Index of a node within its [`FilterTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a node, and every node created beneath it, treats the fields it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    /// Keep only the named fields.
    Include,
    /// Remove the named fields.
    Exclude,
    /// Leave the document alone. This is the state of an empty specification.
    #[default]
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    content: Option<String>,
    filter_type: FilterType,
    children: BTreeMap<String, NodeId>,
}

impl Node {
    fn new(content: Option<String>, filter_type: FilterType) -> Self {
        Self {
            content,
            filter_type,
            children: BTreeMap::new(),
        }
    }
}

/// An ordered tree of field selectors. The root is always [`FilterTree::ROOT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTree {
    nodes: Vec<Node>,
}

impl Default for FilterTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterTree {
    pub const ROOT: NodeId = NodeId(0);

    /// A tree holding only a nameless passthrough root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, FilterType::Passthrough)],
        }
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(Self::ROOT)
    }

    /// View of the node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node {} is not in this tree", id.0);
        NodeRef { tree: self, id }
    }

    pub fn set_filter_type(&mut self, id: NodeId, filter_type: FilterType) {
        self.nodes[id.0].filter_type = filter_type;
    }

    /// Return the child of `parent` named `name`, creating it if needed.
    ///
    /// A new child takes the parent's filter type at the moment it is created.
    pub fn add_or_get_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(&existing) = self.nodes[parent.0].children.get(name) {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        let filter_type = self.nodes[parent.0].filter_type;
        self.nodes
            .push(Node::new(Some(name.to_string()), filter_type));
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }

    /// Deep copy of the subtree rooted at `id` into a new, compact arena.
    ///
    /// The copied root keeps its content and filter type.
    pub fn subtree(&self, id: NodeId) -> FilterTree {
        let source = &self.nodes[id.0];
        let mut copy = FilterTree {
            nodes: vec![Node::new(source.content.clone(), source.filter_type)],
        };
        copy.copy_children(self, id, Self::ROOT);
        copy
    }

    fn copy_children(&mut self, source: &FilterTree, from: NodeId, to: NodeId) {
        for (name, &child) in &source.nodes[from.0].children {
            let new_id = NodeId(self.nodes.len());
            let original = &source.nodes[child.0];
            self.nodes
                .push(Node::new(original.content.clone(), original.filter_type));
            self.nodes[to.0].children.insert(name.clone(), new_id);
            self.copy_children(source, child, new_id);
        }
    }
}

/// Borrowed view of a single node and its subtree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a FilterTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a FilterTree {
        self.tree
    }

    /// The field this node selects, `None` for the synthetic root.
    pub fn content(&self) -> Option<&'a str> {
        self.raw().content.as_deref()
    }

    pub fn filter_type(&self) -> FilterType {
        self.raw().filter_type
    }

    /// Children in lexicographic order of their names.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.raw()
            .children
            .values()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        self.raw().children.get(name).map(|&id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn has_children(&self) -> bool {
        !self.raw().children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.raw().children.len()
    }

    /// Walk a dotted path (`a.b.c`) down from this node.
    ///
    /// Trailing dots are ignored, so `a.` finds `a`. Any other empty segment
    /// matches nothing.
    pub fn descendant(&self, path: &str) -> Option<NodeRef<'a>> {
        let trimmed = path.trim_end_matches('.');
        let path = if trimmed.is_empty() { path } else { trimmed };
        path.split('.')
            .try_fold(*self, |node, name| node.child(name))
    }

    /// This node plus all of its descendants.
    pub fn count_all_nodes(&self) -> usize {
        1 + self.children().map(|c| c.count_all_nodes()).sum::<usize>()
    }

    fn raw(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }
}

impl PartialEq for NodeRef<'_> {
    /// Structural equality: same content, mode and children, wherever the
    /// nodes are stored.
    fn eq(&self, other: &Self) -> bool {
        self.content() == other.content()
            && self.filter_type() == other.filter_type()
            && self.child_count() == other.child_count()
            && self.children().zip(other.children()).all(|(a, b)| a == b)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("content", &self.content())
            .field("filter_type", &self.filter_type())
            .field("children", &self.children().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = self
            .children()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
            .replace('-', "");

        match self.content() {
            None if self.filter_type() == FilterType::Exclude => write!(f, "-{children}"),
            None => f.write_str(&children),
            Some(content) => match self.child_count() {
                0 => f.write_str(content),
                1 => write!(f, "{content}.{children}"),
                _ => write!(f, "{content}({children})"),
            },
        }
    }
}
