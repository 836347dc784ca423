//! Capability contracts for the launcher's external collaborators.
//!
//! # Responsibilities
//! - Define the routing, mounting, lazy-loading and host-page surfaces the
//!   launcher consumes
//! - Define the render context components observe during a render pass
//! - Bundle concrete capability objects for injection into a Launcher
//!
//! # Design Decisions
//! - Collaborators are opaque: the core never matches paths, never renders,
//!   never loads code; it only calls these traits
//! - One trait per collaborator, selected and bound at Launcher construction
//! - The bundle is cloneable so subsystems can hold their own handles

pub mod context;
pub mod loading;
pub mod mounting;
pub mod page;
pub mod routing;

use std::sync::Arc;

pub use context::{dep_hash, EffectRequest, RedirectRequest, RenderContext};
pub use loading::LazyLoader;
pub use mounting::{ViewRoot, ViewRuntime};
pub use page::{ContainerHandle, HostPage};
pub use routing::{HistoryMode, Location, NavigateOptions, Navigator, NavigatorApi, RoutingBackend};

/// The full capability set a Launcher is constructed against.
#[derive(Clone)]
pub struct Capabilities {
    pub routing: Arc<dyn RoutingBackend>,
    pub runtime: Arc<dyn ViewRuntime>,
    pub loader: Arc<dyn LazyLoader>,
    pub page: Arc<dyn HostPage>,
}
