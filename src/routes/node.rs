//! Compiled route tree types.

use std::fmt;
use std::sync::{Arc, OnceLock};

use uuid::Uuid;

use crate::view::Element;

/// Reconciliation identity of a compiled node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteKey {
    /// Derived from the descriptor's path.
    Path(String),

    /// Process-unique fallback for nodes without a path. Not stable across
    /// builds, which can cost reconciliation stability; accepted as-is.
    Synthetic(Uuid),
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKey::Path(p) => write!(f, "{p}"),
            RouteKey::Synthetic(id) => write!(f, "~{id}"),
        }
    }
}

/// A route node's element, wrapped lazily.
///
/// Title and inner-plugin wrapping run inside the thunk, so they execute
/// once per node, the first time the routing backend renders it, and the
/// wrapped element is reused for the lifetime of the compiled tree.
pub struct RouteElement {
    cell: OnceLock<Element>,
    init: Box<dyn Fn() -> Element + Send + Sync>,
}

impl RouteElement {
    pub fn new(init: impl Fn() -> Element + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Box::new(init),
        }
    }

    /// The wrapped element, computing it on first use.
    pub fn force(&self) -> Element {
        self.cell.get_or_init(|| (self.init)()).clone()
    }

    /// Whether the thunk has been forced yet.
    pub fn is_forced(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for RouteElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteElement({})",
            if self.is_forced() { "forced" } else { "pending" }
        )
    }
}

/// What a compiled node does when matched.
#[derive(Clone, Debug)]
pub enum RouteContent {
    /// Render the node's wrapped element.
    View(Arc<RouteElement>),

    /// Replace the current history entry with `to`.
    Redirect { to: String },

    /// Render nothing of its own; exists to host children.
    Passthrough,
}

impl RouteContent {
    pub fn kind(&self) -> &'static str {
        match self {
            RouteContent::View(_) => "view",
            RouteContent::Redirect { .. } => "redirect",
            RouteContent::Passthrough => "pass-through",
        }
    }
}

/// One node of the compiled route tree.
#[derive(Clone, Debug)]
pub struct CompiledRoute {
    pub key: RouteKey,
    pub path: Option<String>,
    pub index: bool,
    pub case_sensitive: bool,
    pub content: RouteContent,
    pub children: Vec<CompiledRoute>,
}

impl CompiledRoute {
    /// Nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CompiledRoute::node_count).sum::<usize>()
    }

    /// Depth of this subtree; a leaf is 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CompiledRoute::depth)
            .max()
            .unwrap_or(0)
    }
}
