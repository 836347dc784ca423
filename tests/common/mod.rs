//! Shared fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use route_launcher::config::RouteDescriptor;
use route_launcher::plugin::{Plugin, PluginOptions};
use route_launcher::view::{link, Component, Element};

/// Component rendering a node with a nested outlet.
#[allow(dead_code)]
pub fn page(tag: &'static str) -> Component {
    Component::new(tag, move |_| Element::node(tag).child(Element::Outlet))
}

/// Component rendering a node with a link and a nested outlet.
#[allow(dead_code)]
pub fn page_with_link(tag: &'static str, to: &'static str) -> Component {
    Component::new(tag, move |_| {
        Element::node(tag)
            .child(link(to, to))
            .child(Element::Outlet)
    })
}

/// Plugin that wraps elements in a node named after itself, counting calls
/// and recording the descriptor identities handed to its inner wrapper.
pub struct RecordingPlugin {
    name: String,
    outer: bool,
    inner: bool,
    pub outer_calls: AtomicUsize,
    pub inner_calls: AtomicUsize,
    pub seen_routes: Mutex<Vec<usize>>,
}

impl RecordingPlugin {
    #[allow(dead_code)]
    pub fn both(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            outer: true,
            inner: true,
            outer_calls: AtomicUsize::new(0),
            inner_calls: AtomicUsize::new(0),
            seen_routes: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn inner_only(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            outer: false,
            inner: true,
            outer_calls: AtomicUsize::new(0),
            inner_calls: AtomicUsize::new(0),
            seen_routes: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn inner_count(&self) -> usize {
        self.inner_calls.load(Ordering::SeqCst)
    }
}

impl Plugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap_outer(&self, element: &Element, _options: &PluginOptions) -> Option<Element> {
        if !self.outer {
            return None;
        }
        self.outer_calls.fetch_add(1, Ordering::SeqCst);
        Some(Element::node(self.name.clone()).child(element.clone()))
    }

    fn wrap_inner(
        &self,
        element: &Element,
        route: &Arc<RouteDescriptor>,
        _options: &PluginOptions,
    ) -> Option<Element> {
        if !self.inner {
            return None;
        }
        self.inner_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_routes
            .lock()
            .unwrap()
            .push(Arc::as_ptr(route) as usize);
        Some(Element::node(self.name.clone()).child(element.clone()))
    }
}
