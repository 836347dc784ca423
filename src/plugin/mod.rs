//! Plugin pipeline.
//!
//! # Responsibilities
//! - Hold the ordered plugin registration list
//! - Fold outer wrappers around the router element, once per start
//! - Fold inner wrappers around each compiled route's element, once per node
//!
//! # Design Decisions
//! - Registration order is application order for both folds: a plugin
//!   registered second wraps outside a plugin registered first
//! - A plugin signals an absent capability by returning `None`; the fold
//!   skips it (no inheritance, no marker traits)
//! - The same plugin object may be registered any number of times
//! - No isolation: a panicking wrapper propagates out of the render pass and
//!   takes the app down with it

use std::sync::Arc;

use crate::config::RouteDescriptor;
use crate::view::Element;

/// Free-form per-registration options, handed back to the plugin on every
/// wrap call.
pub type PluginOptions = serde_json::Map<String, serde_json::Value>;

/// A launcher extension.
///
/// Both capabilities are optional; the defaults decline. A wrapper that
/// panics is not caught anywhere in the launcher, so one bad plugin breaks
/// the whole app. That is the contract, not an oversight.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Wrap the fully built router element. Return `None` when this plugin
    /// has no outer capability.
    fn wrap_outer(&self, element: &Element, options: &PluginOptions) -> Option<Element> {
        let _ = (element, options);
        None
    }

    /// Wrap one route node's element. Receives the original descriptor the
    /// node was compiled from; the same allocation is handed to every inner
    /// plugin for that node, so plugins may compare descriptor identities
    /// across calls. Return `None` when this plugin has no inner capability.
    fn wrap_inner(
        &self,
        element: &Element,
        route: &Arc<RouteDescriptor>,
        options: &PluginOptions,
    ) -> Option<Element> {
        let _ = (element, route, options);
        None
    }
}

#[derive(Clone)]
struct PluginRegistration {
    plugin: Arc<dyn Plugin>,
    options: PluginOptions,
}

/// The ordered registration list.
#[derive(Clone, Default)]
pub struct PluginSet {
    registrations: Vec<PluginRegistration>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. Duplicates are kept; order is significant.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>, options: PluginOptions) {
        tracing::debug!(plugin = plugin.name(), "Plugin registered");
        self.registrations.push(PluginRegistration { plugin, options });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Fold outer wrappers over `element` in registration order.
    pub fn wrap_outer(&self, element: Element) -> Element {
        let mut acc = element;
        for reg in &self.registrations {
            if let Some(wrapped) = reg.plugin.wrap_outer(&acc, &reg.options) {
                acc = wrapped;
            }
        }
        acc
    }

    /// Fold inner wrappers over one route node's element in registration
    /// order.
    pub fn wrap_inner(&self, element: Element, route: &Arc<RouteDescriptor>) -> Element {
        let mut acc = element;
        for reg in &self.registrations {
            if let Some(wrapped) = reg.plugin.wrap_inner(&acc, route, &reg.options) {
                acc = wrapped;
            }
        }
        acc
    }
}
