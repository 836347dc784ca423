//! Launcher configuration subsystem.
//!
//! # Data Flow
//! ```text
//! code-first:
//!     RouteDescriptor values + LauncherOptions
//!     → validation.rs (advisory semantic checks)
//!     → Launcher (immutable after construction)
//!
//! manifest:
//!     manifest file (TOML)
//!     → loader.rs (parse, resolve component names via registry,
//!                  apply shape precedence)
//!     → LauncherOptions
//!
//! On manifest change:
//!     watcher.rs detects change
//!     → loader.rs re-parses
//!     → new manifest published over a channel
//! ```
//!
//! # Design Decisions
//! - Configuration is immutable once a Launcher owns it
//! - The descriptor model is a closed tagged variant; field-presence
//!   precedence is applied exactly once, when raw shapes are resolved
//! - Validation is advisory: it reports findings, it never changes the
//!   precedence semantics

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{
    load_manifest, resolve_manifest, ComponentRegistry, ManifestError, ManifestFile,
    ManifestOptions, RawRoute,
};
pub use schema::{
    IndexRoute, LauncherOptions, LayoutRoute, PathRoute, RedirectRoute, RouteDescriptor,
    RouteParts, RouteView, DEFAULT_ROOT_NODE,
};
pub use validation::{validate_raw, validate_routes, ValidationNote};
pub use watcher::ManifestWatcher;
