//! Routing capability: history, navigation and router-tree registration.

use std::sync::Arc;

use crate::routes::CompiledRoute;
use crate::view::Element;

/// History strategy selected by the launcher's `hash` option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// Path-based history (the default).
    Browser,
    /// Fragment-based history.
    Hash,
}

/// The current app-relative location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Options for a programmatic navigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// Raw navigation surface implemented by a routing backend.
pub trait NavigatorApi: Send + Sync {
    fn navigate(&self, to: &str, options: NavigateOptions);
    fn back(&self);
    fn location(&self) -> Location;
}

/// Cloneable handle to a backend's navigation surface.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<dyn NavigatorApi>,
}

impl Navigator {
    pub fn new(inner: Arc<dyn NavigatorApi>) -> Self {
        Self { inner }
    }

    pub fn navigate(&self, to: &str, options: NavigateOptions) {
        self.inner.navigate(to, options);
    }

    /// Navigate, pushing a new history entry.
    pub fn push(&self, to: &str) {
        self.navigate(to, NavigateOptions { replace: false });
    }

    /// Navigate, replacing the current history entry.
    pub fn replace(&self, to: &str) {
        self.navigate(to, NavigateOptions { replace: true });
    }

    pub fn back(&self) {
        self.inner.back();
    }

    pub fn location(&self) -> Location {
        self.inner.location()
    }

    /// Identity of the underlying capability object. Stable for the lifetime
    /// of the backend; used in effect dependency lists.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

/// The routing capability consumed by the launcher.
///
/// The backend owns path matching and location resolution; the launcher only
/// hands it a compiled route tree and mounts whatever element comes back.
pub trait RoutingBackend: Send + Sync {
    /// Build the router element for a compiled route tree. Registering the
    /// tree configures the backend's history for the given mode and basename.
    fn router_element(
        &self,
        tree: Arc<[CompiledRoute]>,
        mode: HistoryMode,
        basename: Option<String>,
    ) -> Element;

    /// Handle for programmatic navigation against this backend.
    fn navigator(&self) -> Navigator;
}
