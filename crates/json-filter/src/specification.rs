//! `FilterSpecification`: a parsed filter, ready to apply to documents.
//!
//! A specification names JSON fields to keep (`a.b,c(d,e)`) or, with a
//! leading dash, fields to remove (`-a.b,c(d,e)`).
//!
//! The filter tree sits behind an `Arc`. A sub-filter is a *view*: it shares
//! the parent's arena and starts at one of its descendants. The tree is never
//! mutated after parsing, so views cannot observe changes made through one
//! another. [`FilterSpecification::detach`] copies a view's subtree into an
//! arena of its own.

use crate::error::Result;
use crate::node::{FilterTree, FilterType, NodeId, NodeRef};
use crate::parser::Parser;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A parsed filter specification, or the empty passthrough specification.
#[derive(Debug, Clone)]
pub struct FilterSpecification {
    tree: Arc<FilterTree>,
    root: NodeId,
}

impl Default for FilterSpecification {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSpecification {
    /// The empty specification. Applying it leaves documents untouched.
    pub fn new() -> Self {
        Self::from_tree(FilterTree::new())
    }

    /// Parse a filter string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FilterError::UnexpectedToken`] if `filter` does not
    /// match the grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_filter::FilterSpecification;
    ///
    /// let fs = FilterSpecification::parse("key1.key11,key1.key12").unwrap();
    /// assert_eq!(fs.to_string(), "key1(key11,key12)");
    /// ```
    pub fn parse(filter: &str) -> Result<Self> {
        let spec = Self::from_tree(Parser::parse(filter)?);
        tracing::debug!(
            filter,
            canonical = %spec,
            nodes = spec.root().count_all_nodes(),
            "parsed filter specification"
        );
        Ok(spec)
    }

    /// Wrap an already-built tree, rooted at [`FilterTree::ROOT`].
    pub fn from_tree(tree: FilterTree) -> Self {
        Self {
            tree: Arc::new(tree),
            root: FilterTree::ROOT,
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.tree.node(self.root)
    }

    pub fn filter_type(&self) -> FilterType {
        self.root().filter_type()
    }

    pub fn is_passthrough(&self) -> bool {
        self.filter_type() == FilterType::Passthrough
    }

    /// The canonical filter string.
    pub fn filter(&self) -> String {
        self.root().to_string()
    }

    /// The specification rooted at the node addressed by a dotted path, or
    /// `None` if the path does not resolve.
    ///
    /// The result shares this specification's tree. Its canonical form names
    /// the addressed node itself and never carries a leading dash.
    ///
    /// ```
    /// use json_filter::FilterSpecification;
    ///
    /// let fs = FilterSpecification::parse("-feeders(assets(connections(b,a),siteId))").unwrap();
    /// let sub = fs.subfilter("feeders.assets.connections").unwrap();
    /// assert_eq!(sub.to_string(), "connections(a,b)");
    /// assert!(fs.subfilter("feeders.blah").is_none());
    /// ```
    pub fn subfilter(&self, path: &str) -> Option<FilterSpecification> {
        let descendant = self.root().descendant(path)?;
        Some(Self {
            tree: Arc::clone(&self.tree),
            root: descendant.id(),
        })
    }

    /// True if this specification does not share its tree with any other
    /// specification.
    pub fn is_detached(&self) -> bool {
        Arc::strong_count(&self.tree) == 1 && self.root == FilterTree::ROOT
    }

    /// A copy of this specification's subtree in a fresh arena.
    pub fn detach(&self) -> FilterSpecification {
        Self::from_tree(self.tree.subtree(self.root))
    }

    /// The subtree reachable from this specification's root, as an owned tree.
    pub fn to_owned_subtree(&self) -> FilterTree {
        self.tree.subtree(self.root)
    }
}

impl PartialEq for FilterSpecification {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for FilterSpecification {}

impl FromStr for FilterSpecification {
    type Err = crate::error::FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FilterSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
