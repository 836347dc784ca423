//! In-memory host page: containers, title, dev warnings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::capability::{ContainerHandle, HostPage};
use crate::config::DEFAULT_ROOT_NODE;

/// The headless stand-in for a document: a selector-to-container map, a
/// title slot and a development warning log.
pub struct HeadlessPage {
    containers: Mutex<HashMap<String, ContainerHandle>>,
    title: ArcSwap<String>,
    warning_suppressed: AtomicBool,
    warnings: Mutex<Vec<String>>,
}

impl HeadlessPage {
    /// A page with the default mount container already present.
    pub fn new() -> Self {
        let page = Self {
            containers: Mutex::new(HashMap::new()),
            title: ArcSwap::from_pointee(String::new()),
            warning_suppressed: AtomicBool::new(false),
            warnings: Mutex::new(Vec::new()),
        };
        page.add_container(DEFAULT_ROOT_NODE);
        page
    }

    /// Register a container for a selector. Returns the handle.
    pub fn add_container(&self, selector: &str) -> ContainerHandle {
        let handle = ContainerHandle::new(selector.to_string());
        self.containers
            .lock()
            .unwrap()
            .insert(selector.to_string(), handle.clone());
        handle
    }

    /// Remove a container, e.g. to test unresolvable mount targets.
    pub fn remove_container(&self, selector: &str) {
        self.containers.lock().unwrap().remove(selector);
    }

    /// Record a development warning unless suppression is on.
    pub fn emit_warning(&self, message: &str) {
        if self.warning_suppressed.load(Ordering::SeqCst) {
            return;
        }
        tracing::warn!(message, "Development warning");
        self.warnings.lock().unwrap().push(message.to_string());
    }

    pub fn set_warning_suppressed(&self, suppressed: bool) {
        self.warning_suppressed.store(suppressed, Ordering::SeqCst);
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPage for HeadlessPage {
    fn query(&self, selector: &str) -> Option<ContainerHandle> {
        self.containers.lock().unwrap().get(selector).cloned()
    }

    fn set_title(&self, title: &str) {
        self.title.store(Arc::new(title.to_string()));
    }

    fn title(&self) -> String {
        self.title.load().as_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_container_is_queryable() {
        let page = HeadlessPage::new();
        assert!(page.query(DEFAULT_ROOT_NODE).is_some());
        assert!(page.query("#missing").is_none());
    }

    #[test]
    fn test_title_round_trip() {
        let page = HeadlessPage::new();
        assert_eq!(page.title(), "");
        page.set_title("Dashboard");
        assert_eq!(page.title(), "Dashboard");
    }

    #[test]
    fn test_suppression_gates_warnings() {
        let page = HeadlessPage::new();
        page.emit_warning("first");
        page.set_warning_suppressed(true);
        page.emit_warning("second");
        page.set_warning_suppressed(false);
        page.emit_warning("third");
        assert_eq!(page.warnings(), ["first", "third"]);
    }
}
