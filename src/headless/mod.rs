//! Headless reference backend.
//!
//! # Responsibilities
//! - Implement every capability trait in memory: history and matching
//!   (routing), render passes and roots (mounting), suspending factories
//!   (lazy loading), containers and title (host page)
//! - Give integration tests and the inspection CLI a complete host to run
//!   launchers against
//!
//! # Design Decisions
//! - This is a collaborator implementation, not launcher core: path matching
//!   and render mechanics live only here
//! - Matching is deliberately minimal: exact segments, relative and absolute
//!   child paths, per-route case flag; first sibling match wins
//! - Render passes are synchronous; the only asynchrony is factory
//!   resolution, which re-renders on completion

pub mod history;
pub mod loader;
pub mod page;
pub mod router;
pub mod runtime;

use std::sync::Arc;

use crate::capability::{Capabilities, HostPage, Location, Navigator};
use crate::view::ViewNode;

pub use history::HistoryStack;
pub use loader::HeadlessLoader;
pub use page::HeadlessPage;
pub use router::HeadlessRouting;
pub use runtime::HeadlessRuntime;

/// Version the default headless runtime reports; new enough for the
/// persistent-root mount path.
pub const DEFAULT_RUNTIME_VERSION: u32 = 19;

/// A complete headless host: page, runtime, routing and loader wired
/// together.
pub struct HeadlessApp {
    page: Arc<HeadlessPage>,
    runtime: Arc<HeadlessRuntime>,
    routing: Arc<HeadlessRouting>,
    loader: Arc<HeadlessLoader>,
}

impl HeadlessApp {
    /// A host whose rendering library reports [`DEFAULT_RUNTIME_VERSION`].
    pub fn new() -> Self {
        Self::with_version(DEFAULT_RUNTIME_VERSION)
    }

    /// A host whose rendering library reports the given major version.
    pub fn with_version(version: u32) -> Self {
        let page = Arc::new(HeadlessPage::new());
        let runtime = HeadlessRuntime::new(version, Arc::clone(&page));
        let routing = Arc::new(HeadlessRouting::new(Arc::clone(&runtime)));
        let loader = Arc::new(HeadlessLoader::new(Arc::clone(&runtime)));
        Self {
            page,
            runtime,
            routing,
            loader,
        }
    }

    /// Capability bundle for [`crate::launcher::Launcher::new`].
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            routing: self.routing.clone(),
            runtime: self.runtime.clone(),
            loader: self.loader.clone(),
            page: self.page.clone(),
        }
    }

    pub fn page(&self) -> &Arc<HeadlessPage> {
        &self.page
    }

    pub fn runtime(&self) -> &Arc<HeadlessRuntime> {
        &self.runtime
    }

    pub fn navigator(&self) -> Navigator {
        self.runtime.navigator()
    }

    pub fn location(&self) -> Location {
        self.runtime.location()
    }

    /// Rendered contents of a container, if anything has been mounted there.
    pub fn rendered(&self, selector: &str) -> Option<Arc<ViewNode>> {
        self.page.query(selector).and_then(|c| c.contents())
    }

    pub fn title(&self) -> String {
        self.page.title()
    }

    /// Find a link with the given target in the default container and follow
    /// it. Returns false when no such link is rendered.
    pub fn click(&self, to: &str) -> bool {
        let Some(view) = self.rendered(crate::config::DEFAULT_ROOT_NODE) else {
            return false;
        };
        let mut links = Vec::new();
        view.find_all("a", &mut links);
        if links.iter().any(|l| l.attr("to") == Some(to)) {
            self.navigator().push(to);
            true
        } else {
            false
        }
    }

    /// Wait for all pending lazy factories, including any started by the
    /// re-renders their completion triggers.
    pub async fn settle(&self) {
        self.runtime.settle().await;
    }
}

impl Default for HeadlessApp {
    fn default() -> Self {
        Self::new()
    }
}
