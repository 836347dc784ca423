//! The launcher: configuration in, mounted router out.
//!
//! # Data Flow
//! ```text
//! Launcher::start()
//!     → routes::build (compile descriptors; inner wrapping deferred
//!       into per-node thunks)
//!     → routing backend (router element for the compiled tree)
//!     → plugin outer fold (registration order)
//!     → strict-mode marker (optional)
//!     → resolve mount target (error if missing)
//!     → mount adapter
//! ```
//!
//! # Design Decisions
//! - Plugins register before start; registration order is wrap order
//! - start() may be called again; it re-runs the whole pipeline and reuses
//!   the lazy cache, so resolved lazy views stay resolved. Guarding against
//!   double starts is the caller's job
//! - A missing mount target is a configuration error surfaced synchronously

use std::sync::Arc;

use thiserror::Error;

use crate::capability::{Capabilities, HistoryMode};
use crate::config::{validate_routes, LauncherOptions};
use crate::lazy::LazyCache;
use crate::mount::MountAdapter;
use crate::plugin::{Plugin, PluginOptions, PluginSet};
use crate::routes::{build, BuildContext};
use crate::view::{defaults, Element};

/// Errors surfaced by [`Launcher::start`].
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The configured mount target selector matched nothing on the host
    /// page.
    #[error("mount target {0:?} did not resolve to a container")]
    ContainerNotFound(String),
}

/// Holds configuration and plugins; orchestrates compile, wrap and mount.
pub struct Launcher {
    options: LauncherOptions,
    plugins: PluginSet,
    capabilities: Capabilities,
    adapter: MountAdapter,
    lazy_cache: LazyCache,
}

impl Launcher {
    pub fn new(options: LauncherOptions, capabilities: Capabilities) -> Self {
        let adapter = MountAdapter::new(Arc::clone(&capabilities.runtime));
        Self {
            options,
            plugins: PluginSet::new(),
            capabilities,
            adapter,
            lazy_cache: LazyCache::new(),
        }
    }

    pub fn options(&self) -> &LauncherOptions {
        &self.options
    }

    /// Register a plugin. May be called multiple times, also with the same
    /// plugin; every registration wraps outside the ones before it.
    pub fn use_plugin(&mut self, plugin: Arc<dyn Plugin>, options: PluginOptions) {
        self.plugins.register(plugin, options);
    }

    /// Build the route tree, apply plugins and mount the result.
    pub fn start(&self) -> Result<(), LauncherError> {
        for finding in validate_routes(&self.options.routes) {
            tracing::warn!(%finding, "Route validation");
        }

        let cx = BuildContext {
            plugins: Arc::new(self.plugins.clone()),
            loader: Arc::clone(&self.capabilities.loader),
            lazy_cache: self.lazy_cache.clone(),
            default_loading: defaults::loading(),
        };
        let tree = build(&self.options.routes, &cx);
        let routes = tree.len();

        let mode = if self.options.hash {
            HistoryMode::Hash
        } else {
            HistoryMode::Browser
        };
        let router = self.capabilities.routing.router_element(
            tree.into(),
            mode,
            self.options.basename.clone(),
        );

        let app = self.plugins.wrap_outer(router);
        let app = if self.options.strict_mode {
            Element::node("strict-mode").child(app)
        } else {
            app
        };

        let container = self
            .capabilities
            .page
            .query(&self.options.root_node)
            .ok_or_else(|| LauncherError::ContainerNotFound(self.options.root_node.clone()))?;

        self.adapter.mount(app, &container);

        tracing::info!(
            routes,
            plugins = self.plugins.len(),
            target = %self.options.root_node,
            mode = ?mode,
            "Launcher started"
        );
        Ok(())
    }
}
