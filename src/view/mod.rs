//! View vocabulary shared by the launcher core and capability backends.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor (config)
//!     → routes::build (compile, wrap)
//!     → Element tree (declarative, cheap to clone)
//!     → capability backend render pass
//!     → ViewNode tree (concrete output, inspectable)
//! ```
//!
//! # Design Decisions
//! - Elements are descriptions, not live views; instantiating them is the
//!   rendering capability's job
//! - Components are named closures over a render context (no inheritance)
//! - ViewNode is comparable with Eq so tests can assert on rendered output

pub mod component;
pub mod element;

pub use component::{AsyncFactory, Component, LoadError};
pub use element::{link, Element, ViewNode};

/// Built-in fallback views.
pub mod defaults {
    use super::{Component, Element};

    /// Default placeholder shown while a lazy component's factory is pending.
    pub fn loading() -> Component {
        Component::new("loading", |_| {
            Element::node("loading").child(Element::text("loading..."))
        })
    }
}
