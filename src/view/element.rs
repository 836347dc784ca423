//! Element and rendered-node trees.

use std::collections::BTreeMap;

use super::component::Component;

/// A declarative description of a view.
///
/// Elements are cheap to clone: component references are shared, only the
/// static structure is copied. Plugins and wrappers transform elements; a
/// rendering capability turns them into [`ViewNode`]s.
#[derive(Clone, Debug)]
pub enum Element {
    /// Literal text.
    Text(String),

    /// A static container with a tag, attributes and children.
    Node {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<Element>,
    },

    /// A sequence of elements spliced into the parent.
    Fragment(Vec<Element>),

    /// A component invoked at render time.
    Component(Component),

    /// Placeholder filled by the routing backend with the matched child
    /// route's element. Renders nothing when no child route matched.
    Outlet,

    /// Route frame scope. The routing backend wraps each matched route's
    /// element in a scope so nested renders observe that frame's resolved
    /// path and outlet. The launcher core never constructs these.
    Scope {
        resolved: String,
        outlet: Option<Box<Element>>,
        child: Box<Element>,
    },
}

impl Element {
    /// Create an empty node with the given tag.
    pub fn node(tag: impl Into<String>) -> Element {
        Element::Node {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a text element.
    pub fn text(text: impl Into<String>) -> Element {
        Element::Text(text.into())
    }

    /// Add an attribute. No-op on non-node elements.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Element {
        if let Element::Node { ref mut attrs, .. } = self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    /// Append a child. No-op on non-node, non-fragment elements.
    pub fn child(mut self, element: Element) -> Element {
        match self {
            Element::Node {
                ref mut children, ..
            }
            | Element::Fragment(ref mut children) => children.push(element),
            _ => {}
        }
        self
    }
}

/// Navigation link element. The headless backend treats `a` nodes with a
/// `to` attribute as clickable.
pub fn link(to: impl Into<String>, label: impl Into<String>) -> Element {
    Element::node("a")
        .attr("to", to)
        .child(Element::text(label))
}

/// A concrete rendered view, produced from an [`Element`] by a rendering
/// capability. Comparable so tests can assert on output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewNode {
    Text(String),
    Node {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<ViewNode>,
    },
}

impl ViewNode {
    /// Depth-first search for the first node with the given tag.
    pub fn find(&self, tag: &str) -> Option<&ViewNode> {
        match self {
            ViewNode::Text(_) => None,
            ViewNode::Node {
                tag: t, children, ..
            } => {
                if t == tag {
                    return Some(self);
                }
                children.iter().find_map(|c| c.find(tag))
            }
        }
    }

    /// All nodes with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a ViewNode>) {
        if let ViewNode::Node {
            tag: t, children, ..
        } = self
        {
            if t == tag {
                out.push(self);
            }
            for c in children {
                c.find_all(tag, out);
            }
        }
    }

    /// Attribute value, if this is a node and the attribute is set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            ViewNode::Node { attrs, .. } => attrs.get(name).map(String::as_str),
            ViewNode::Text(_) => None,
        }
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            ViewNode::Text(t) => t.clone(),
            ViewNode::Node { children, .. } => {
                children.iter().map(ViewNode::text_content).collect()
            }
        }
    }
}
