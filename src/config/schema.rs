//! Route descriptor and launcher option definitions.
//!
//! Route descriptors form a rooted, ordered, finite tree. Sibling order is
//! significant and preserved through compilation. The four shapes are a
//! closed variant; a node's shape is decided once, by field presence, via
//! [`RouteParts::resolve`].

use crate::view::{AsyncFactory, Component};

/// Default mount target selector.
pub const DEFAULT_ROOT_NODE: &str = "#root";

/// Top-level launcher configuration. Immutable after construction.
#[derive(Clone, Debug)]
pub struct LauncherOptions {
    /// Use fragment-based history instead of path-based history.
    pub hash: bool,

    /// Selector of the node the app mounts into.
    pub root_node: String,

    /// Wrap the app in a strict-mode marker before mounting.
    pub strict_mode: bool,

    /// Path prefix the routing backend mounts under.
    pub basename: Option<String>,

    /// The route tree.
    pub routes: Vec<RouteDescriptor>,
}

impl LauncherOptions {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }
}

impl Default for LauncherOptions {
    fn default() -> Self {
        Self {
            hash: false,
            root_node: DEFAULT_ROOT_NODE.to_string(),
            strict_mode: false,
            basename: None,
            routes: Vec::new(),
        }
    }
}

/// How a route's view is produced.
#[derive(Clone, Debug)]
pub enum RouteView {
    /// A component available immediately.
    Ready(Component),

    /// An async factory resolved on first render; `loading` overrides the
    /// default placeholder while the factory is pending.
    Lazy {
        factory: AsyncFactory,
        loading: Option<Component>,
    },
}

/// A routed view at a path segment.
#[derive(Clone, Debug)]
pub struct PathRoute {
    pub path: String,
    pub case_sensitive: bool,
    /// Absent view makes this a pure pass-through segment hosting children.
    pub view: Option<RouteView>,
    /// Document title applied while this route is active.
    pub title: Option<String>,
    pub children: Vec<RouteDescriptor>,
}

/// A pathless wrapper route. Matches through to its children.
#[derive(Clone, Debug)]
pub struct LayoutRoute {
    pub view: Option<RouteView>,
    pub children: Vec<RouteDescriptor>,
}

/// The default child of its parent. Terminal.
#[derive(Clone, Debug)]
pub struct IndexRoute {
    pub view: Option<RouteView>,
}

/// A terminal client-side redirect. Matching it replaces the current history
/// entry with `to`.
#[derive(Clone, Debug)]
pub struct RedirectRoute {
    pub path: Option<String>,
    pub to: String,
}

/// One node of the declarative route tree.
#[derive(Clone, Debug)]
pub enum RouteDescriptor {
    Path(PathRoute),
    Layout(LayoutRoute),
    Index(IndexRoute),
    Redirect(RedirectRoute),
}

impl RouteDescriptor {
    /// Path route with a ready component.
    pub fn route(path: impl Into<String>, component: Component) -> Self {
        RouteDescriptor::Path(PathRoute {
            path: path.into(),
            case_sensitive: false,
            view: Some(RouteView::Ready(component)),
            title: None,
            children: Vec::new(),
        })
    }

    /// Pure pass-through path segment.
    pub fn segment(path: impl Into<String>) -> Self {
        RouteDescriptor::Path(PathRoute {
            path: path.into(),
            case_sensitive: false,
            view: None,
            title: None,
            children: Vec::new(),
        })
    }

    /// Pathless layout route with a component.
    pub fn layout(component: Component) -> Self {
        RouteDescriptor::Layout(LayoutRoute {
            view: Some(RouteView::Ready(component)),
            children: Vec::new(),
        })
    }

    /// Index route with a ready component.
    pub fn index(component: Component) -> Self {
        RouteDescriptor::Index(IndexRoute {
            view: Some(RouteView::Ready(component)),
        })
    }

    /// Redirect route.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        RouteDescriptor::Redirect(RedirectRoute {
            path: Some(path.into()),
            to: to.into(),
        })
    }

    /// Attach a title. Only path routes carry titles; other shapes are
    /// returned unchanged.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if let RouteDescriptor::Path(ref mut p) = self {
            p.title = Some(title.into());
        }
        self
    }

    /// Attach children. Index and redirect routes are terminal and are
    /// returned unchanged.
    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        match self {
            RouteDescriptor::Path(ref mut p) => p.children = children,
            RouteDescriptor::Layout(ref mut l) => l.children = children,
            _ => {}
        }
        self
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            RouteDescriptor::Path(p) => Some(&p.path),
            RouteDescriptor::Redirect(r) => r.path.as_deref(),
            _ => None,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, RouteDescriptor::Index(_))
    }

    pub fn view(&self) -> Option<&RouteView> {
        match self {
            RouteDescriptor::Path(p) => p.view.as_ref(),
            RouteDescriptor::Layout(l) => l.view.as_ref(),
            RouteDescriptor::Index(i) => i.view.as_ref(),
            RouteDescriptor::Redirect(_) => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            RouteDescriptor::Path(p) => p.title.as_deref(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[RouteDescriptor] {
        match self {
            RouteDescriptor::Path(p) => &p.children,
            RouteDescriptor::Layout(l) => &l.children,
            _ => &[],
        }
    }
}

/// The raw, all-fields-optional shape of a route, before its variant is
/// decided. This is the union the manifest loader produces and the single
/// place field-presence precedence is applied.
#[derive(Debug, Default)]
pub struct RouteParts {
    pub path: Option<String>,
    pub index: bool,
    pub case_sensitive: bool,
    pub view: Option<RouteView>,
    pub title: Option<String>,
    pub redirect: Option<String>,
    pub children: Vec<RouteDescriptor>,
}

impl RouteParts {
    /// Decide the node's shape.
    ///
    /// Precedence, in order:
    /// 1. `redirect` set and no view: redirect route. Children are dropped;
    ///    redirects are terminal.
    /// 2. `index`: index route (terminal, children dropped).
    /// 3. `path` present: path route.
    /// 4. otherwise: layout route.
    ///
    /// A node with both `redirect` and a view resolves as a normal component
    /// route; the redirect is ignored. Titles are honored on path routes
    /// only.
    pub fn resolve(self) -> RouteDescriptor {
        if let (Some(to), None) = (self.redirect.as_ref(), self.view.as_ref()) {
            return RouteDescriptor::Redirect(RedirectRoute {
                path: self.path,
                to: to.clone(),
            });
        }
        if self.index {
            return RouteDescriptor::Index(IndexRoute { view: self.view });
        }
        match self.path {
            Some(path) => RouteDescriptor::Path(PathRoute {
                path,
                case_sensitive: self.case_sensitive,
                view: self.view,
                title: self.title,
                children: self.children,
            }),
            None => RouteDescriptor::Layout(LayoutRoute {
                view: self.view,
                children: self.children,
            }),
        }
    }
}
