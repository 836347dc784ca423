//! Recursive route tree compilation.
//!
//! # Responsibilities
//! - Walk the descriptor tree in sibling order
//! - Apply redirect precedence (redirect only acts when no view is present)
//! - Resolve lazy views through the memoizing cache
//! - Defer title and inner-plugin wrapping into per-node thunks
//! - Assign node keys
//!
//! # Design Decisions
//! - Output shape mirrors input shape, except redirects, which are terminal
//! - The original descriptor travels with each node, one shared allocation
//!   per node, so inner plugins see a stable identity

use std::sync::Arc;

use uuid::Uuid;

use crate::capability::LazyLoader;
use crate::config::{RouteDescriptor, RouteView};
use crate::lazy::LazyCache;
use crate::plugin::PluginSet;
use crate::title;
use crate::view::{Component, Element};

use super::node::{CompiledRoute, RouteContent, RouteElement, RouteKey};

/// Everything the builder needs besides the descriptors themselves.
#[derive(Clone)]
pub struct BuildContext {
    pub plugins: Arc<PluginSet>,
    pub loader: Arc<dyn LazyLoader>,
    pub lazy_cache: LazyCache,
    pub default_loading: Component,
}

/// Compile a descriptor sequence. Empty input is a valid empty tree.
pub fn build(descriptors: &[RouteDescriptor], cx: &BuildContext) -> Vec<CompiledRoute> {
    descriptors.iter().map(|d| build_one(d, cx)).collect()
}

fn build_one(descriptor: &RouteDescriptor, cx: &BuildContext) -> CompiledRoute {
    // Redirect precedence: only a node without a view redirects. The
    // descriptor model upholds that by construction; redirects compile to
    // terminal nodes whatever the input looked like.
    if let RouteDescriptor::Redirect(r) = descriptor {
        tracing::debug!(path = ?r.path, to = %r.to, "Compiled redirect route");
        return CompiledRoute {
            key: key_for(r.path.as_deref()),
            path: r.path.clone(),
            index: false,
            case_sensitive: false,
            content: RouteContent::Redirect { to: r.to.clone() },
            children: Vec::new(),
        };
    }

    let path = descriptor.path().map(str::to_string);
    let index = descriptor.is_index();
    let case_sensitive = match descriptor {
        RouteDescriptor::Path(p) => p.case_sensitive,
        _ => false,
    };
    let children = build(descriptor.children(), cx);

    let content = match descriptor.view() {
        None => {
            if path.is_none() && !index {
                tracing::warn!(
                    "Route has neither path nor component; its children are only reachable \
                     through their own paths"
                );
            }
            RouteContent::Passthrough
        }
        Some(view) => {
            let component = resolve_view(view, cx);
            let node_title = descriptor.title().map(str::to_string);
            let shared = Arc::new(descriptor.clone());
            let plugins = Arc::clone(&cx.plugins);

            RouteContent::View(Arc::new(RouteElement::new(move || {
                let base = Element::Component(component.clone());
                let titled = match &node_title {
                    Some(t) => title::wrap(base, t.clone()),
                    None => base,
                };
                plugins.wrap_inner(titled, &shared)
            })))
        }
    };

    tracing::debug!(
        path = ?path,
        index,
        content = content.kind(),
        children = children.len(),
        "Compiled route"
    );

    CompiledRoute {
        key: key_for(path.as_deref()),
        path,
        index,
        case_sensitive,
        content,
        children,
    }
}

fn resolve_view(view: &RouteView, cx: &BuildContext) -> Component {
    match view {
        RouteView::Ready(c) => c.clone(),
        RouteView::Lazy { factory, loading } => {
            let loading = loading.clone().unwrap_or_else(|| cx.default_loading.clone());
            cx.lazy_cache.resolve(&cx.loader, factory, loading)
        }
    }
}

fn key_for(path: Option<&str>) -> RouteKey {
    match path {
        Some(p) => RouteKey::Path(p.to_string()),
        None => RouteKey::Synthetic(Uuid::new_v4()),
    }
}
