//! Host page capability: container lookup and the document title.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::view::ViewNode;

/// A mount point resolved from a selector.
///
/// The handle carries a shared output slot the rendering capability writes
/// into; clones refer to the same container. Handle identity (not selector
/// text) keys the mount adapter's root cache.
#[derive(Clone)]
pub struct ContainerHandle {
    selector: Arc<str>,
    slot: Arc<ArcSwapOption<ViewNode>>,
}

impl ContainerHandle {
    pub fn new(selector: impl Into<Arc<str>>) -> Self {
        Self {
            selector: selector.into(),
            slot: Arc::new(ArcSwapOption::const_empty()),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Replace the container's rendered contents.
    pub fn set_contents(&self, view: ViewNode) {
        self.slot.store(Some(Arc::new(view)));
    }

    /// Current rendered contents, if anything has been mounted.
    pub fn contents(&self) -> Option<Arc<ViewNode>> {
        self.slot.load_full()
    }

    /// Identity of the container across handle clones.
    pub fn key(&self) -> usize {
        Arc::as_ptr(&self.slot) as *const () as usize
    }
}

impl std::fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContainerHandle({})", self.selector)
    }
}

/// The host page: where containers are resolved and the title lives.
pub trait HostPage: Send + Sync {
    /// Resolve a selector to a container. `None` when the page has no such
    /// node; the launcher surfaces that as a configuration error.
    fn query(&self, selector: &str) -> Option<ContainerHandle>;

    fn set_title(&self, title: &str);

    fn title(&self) -> String;
}
