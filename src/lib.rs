//! Configuration-driven launcher for single-page app routers.
//!
//! Converts a declarative tree of route descriptors into a mounted router
//! and lets plugins wrap the result, while routing, rendering and lazy
//! loading stay behind capability traits.
//!
//! # Architecture Overview
//!
//! ```text
//!   LauncherOptions                 Launcher::start()
//!   (routes, mode, target) ──────▶ ┌──────────────────────────────┐
//!                                  │ routes::build                │
//!   Plugins (use_plugin) ────────▶ │   redirect precedence        │
//!                                  │   lazy memoization           │
//!                                  │   title + inner wrap thunks  │
//!                                  └──────────────┬───────────────┘
//!                                                 ▼
//!                                  ┌──────────────────────────────┐
//!                                  │ routing capability           │
//!                                  │   router element for tree    │
//!                                  └──────────────┬───────────────┘
//!                                                 ▼
//!                                  ┌──────────────────────────────┐
//!                                  │ plugin outer fold            │
//!                                  │ strict-mode marker           │
//!                                  └──────────────┬───────────────┘
//!                                                 ▼
//!                                  ┌──────────────────────────────┐
//!                                  │ mount adapter                │
//!                                  │   version probe (cached)     │
//!                                  │   legacy render │ persistent │
//!                                  │                 │ root       │
//!                                  └──────────────────────────────┘
//! ```
//!
//! The `headless` module carries an in-memory implementation of every
//! capability, used by the integration tests and the inspection CLI.

// Launcher core
pub mod config;
pub mod launcher;
pub mod lazy;
pub mod mount;
pub mod plugin;
pub mod routes;
pub mod title;

// Capability contracts and shared vocabulary
pub mod capability;
pub mod view;

// Reference backend
pub mod headless;

pub use capability::{
    Capabilities, ContainerHandle, HistoryMode, HostPage, LazyLoader, Location, NavigateOptions,
    Navigator, RenderContext, RoutingBackend, ViewRoot, ViewRuntime,
};
pub use config::{LauncherOptions, RouteDescriptor, RouteView};
pub use launcher::{Launcher, LauncherError};
pub use plugin::{Plugin, PluginOptions};
pub use view::{link, AsyncFactory, Component, Element, LoadError, ViewNode};
