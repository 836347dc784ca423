//! Route compilation subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor tree (config)
//!     → builder.rs (recursive compile, sibling order preserved)
//!         redirect precedence → terminal redirect nodes
//!         lazy views → memoized suspending components
//!         title + inner plugin wrapping → deferred node thunks
//!     → CompiledRoute tree
//!     → handed to the routing backend at start
//! ```
//!
//! # Design Decisions
//! - Compiled trees are immutable; a new tree is built per start
//! - Per-node wrapping is a memoized thunk forced on first render, so a
//!   wrapper runs once per node that actually renders
//! - Keys come from paths; keyless nodes get a random fallback key

pub mod builder;
pub mod node;

pub use builder::{build, BuildContext};
pub use node::{CompiledRoute, RouteContent, RouteElement, RouteKey};
