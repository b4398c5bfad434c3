//! Route tree model.
//!
//! The tree is built once by [`crate::spec::build_tree`] and never mutated.
//! Parents own their children by value; nothing points back up the tree, so
//! "parent of" questions are answered from a [`ResolvedRoute`]'s index path.

use crate::guard::BoundGuard;
use crate::location;
use crate::spec::PathMatch;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage shared by path and query parameters.
///
/// Names are `Arc<str>` because they come from the static tree; values are
/// per-navigation data from the address.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Child positions from the root down to a node.
pub type IndexPath = SmallVec<[usize; 8]>;

/// Identifier of the view bound to a route node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ViewId(Arc<str>);

impl ViewId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One segment of a declared node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the requested segment literally
    Static(String),
    /// Matches any segment and binds it under this name (`{name}`)
    Param(Arc<str>),
}

impl Segment {
    pub(crate) fn matches(&self, requested: &str) -> bool {
        match self {
            Segment::Static(s) => s == requested,
            Segment::Param(_) => true,
        }
    }
}

/// One node of the navigable tree.
pub struct RouteNode {
    pub(crate) path: String,
    pub(crate) segments: Vec<Segment>,
    pub(crate) view_id: Option<ViewId>,
    pub(crate) redirect_to: Option<String>,
    pub(crate) path_match: PathMatch,
    pub(crate) guards: Vec<BoundGuard>,
    pub(crate) children: Vec<RouteNode>,
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("path", &self.path)
            .field("view_id", &self.view_id)
            .field("redirect_to", &self.redirect_to)
            .field("path_match", &self.path_match)
            .field("guards", &self.guard_ids().collect::<Vec<_>>())
            .field("children", &self.children)
            .finish()
    }
}

impl RouteNode {
    /// Declared path segment(s), possibly empty for an index route.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn view_id(&self) -> Option<&ViewId> {
        self.view_id.as_ref()
    }

    #[must_use]
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    #[must_use]
    pub fn path_match(&self) -> PathMatch {
        self.path_match
    }

    /// Whether `redirect_to` only applies when the remaining path is fully consumed.
    #[must_use]
    pub fn exact_match(&self) -> bool {
        self.path_match == PathMatch::Full
    }

    /// Guards in evaluation order.
    #[must_use]
    pub fn guards(&self) -> &[BoundGuard] {
        &self.guards
    }

    pub fn guard_ids(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(|g| g.id.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }

    /// An index route has an empty path and supplies a default for its parent.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.segments.is_empty()
    }
}

/// The immutable route tree.
///
/// The root is synthetic: empty path, no view, the top-level declarations as
/// its children.
#[derive(Debug)]
pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    pub(crate) fn new(children: Vec<RouteNode>) -> Self {
        Self {
            root: RouteNode {
                path: String::new(),
                segments: Vec::new(),
                view_id: None,
                redirect_to: None,
                path_match: PathMatch::Prefix,
                guards: Vec::new(),
                children,
            },
        }
    }

    #[must_use]
    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Follow child positions from the root.
    #[must_use]
    pub fn node_by_indices(&self, indices: &[usize]) -> Option<&RouteNode> {
        indices
            .iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    /// Look up the node owning a declared path, using `/` or `.` as separator.
    ///
    /// Declared paths are compared literally, so `settings.contact` finds the
    /// `contact` child of `settings` and `{id}` must be spelled as declared.
    /// An empty lookup returns the root.
    #[must_use]
    pub fn node_at(&self, declared: &str) -> Option<&RouteNode> {
        let wanted: Vec<&str> = declared
            .split(['/', '.'])
            .filter(|s| !s.is_empty())
            .collect();
        Self::find_declared(&self.root, &wanted)
    }

    fn find_declared<'a>(node: &'a RouteNode, wanted: &[&str]) -> Option<&'a RouteNode> {
        if wanted.is_empty() {
            return Some(node);
        }
        for child in &node.children {
            let own: Vec<&str> = child.path.split('/').filter(|s| !s.is_empty()).collect();
            if own.is_empty() || own.len() > wanted.len() || own[..] != wanted[..own.len()] {
                continue;
            }
            if let Some(found) = Self::find_declared(child, &wanted[own.len()..]) {
                return Some(found);
            }
        }
        None
    }

    /// Every node with its full declared path, depth first, root excluded.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, &RouteNode)> {
        fn walk<'a>(node: &'a RouteNode, prefix: &str, out: &mut Vec<(String, &'a RouteNode)>) {
            for child in &node.children {
                let full = if child.path.is_empty() {
                    prefix.to_string()
                } else if prefix == "/" {
                    format!("/{}", child.path)
                } else {
                    format!("{prefix}/{}", child.path)
                };
                out.push((full.clone(), child));
                walk(child, &full, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, "/", &mut out);
        out
    }

    /// Print the tree to stdout.
    pub fn dump_routes(&self) {
        let entries = self.entries();
        println!("[routes] count={}", entries.len());
        for (path, node) in entries {
            let guards: Vec<&str> = node.guard_ids().collect();
            match (node.view_id(), node.redirect_to()) {
                (_, Some(target)) => println!(
                    "[route] {path} -> redirect {target} ({:?}) guards={guards:?}",
                    node.path_match()
                ),
                (Some(view), None) => println!("[route] {path} -> {view} guards={guards:?}"),
                (None, None) => println!("[route] {path} -> (group) guards={guards:?}"),
            }
        }
    }
}

/// One breadcrumb: a node of the ancestor chain that has a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub path: String,
    pub view_id: ViewId,
}

/// Result of matching a path to a leaf.
///
/// Holds an index path into the shared tree rather than node copies. Created
/// fresh for every match and never mutated afterwards.
#[derive(Clone)]
pub struct ResolvedRoute {
    pub(crate) tree: Arc<RouteTree>,
    pub(crate) indices: IndexPath,
    pub(crate) segments: Vec<String>,
    pub(crate) params: ParamVec,
}

impl fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("path", &self.path())
            .field("indices", &self.indices)
            .field("params", &self.params)
            .finish()
    }
}

impl ResolvedRoute {
    /// Canonical path that was matched.
    #[must_use]
    pub fn path(&self) -> String {
        location::join(&self.segments)
    }

    /// Ancestor chain from the root (inclusive) down to the leaf (inclusive).
    #[must_use]
    pub fn ancestors(&self) -> Vec<&RouteNode> {
        let mut chain = Vec::with_capacity(self.indices.len() + 1);
        let mut node = self.tree.root();
        chain.push(node);
        for &i in &self.indices {
            node = &node.children[i];
            chain.push(node);
        }
        chain
    }

    /// The matched node.
    #[must_use]
    pub fn leaf(&self) -> &RouteNode {
        self.indices
            .iter()
            .fold(self.tree.root(), |node, &i| &node.children[i])
    }

    /// View of the leaf. Always present for routes produced by the matcher.
    #[must_use]
    pub fn view_id(&self) -> Option<&ViewId> {
        self.leaf().view_id()
    }

    #[must_use]
    pub fn params(&self) -> &ParamVec {
        &self.params
    }

    /// Path parameter by name, last write wins.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Concrete path consumed by each node of the ancestor chain.
    fn consumed_paths(&self) -> Vec<String> {
        let mut consumed = 0;
        self.ancestors()
            .into_iter()
            .map(|node| {
                consumed += node.segments.len();
                location::join(&self.segments[..consumed.min(self.segments.len())])
            })
            .collect()
    }

    /// Path of the closest ancestor that renders a view and sits above the
    /// leaf's own path, if any.
    #[must_use]
    pub fn parent_path(&self) -> Option<String> {
        let own = self.path();
        self.ancestors()
            .into_iter()
            .zip(self.consumed_paths())
            .rev()
            .find(|(node, path)| node.view_id.is_some() && *path != own)
            .map(|(_, path)| path)
    }

    /// Nodes of the chain that render a view, outermost first.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.ancestors()
            .into_iter()
            .zip(self.consumed_paths())
            .filter_map(|(node, path)| {
                node.view_id.clone().map(|view_id| Breadcrumb { path, view_id })
            })
            .collect()
    }
}
