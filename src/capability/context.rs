//! Render context: what a component can observe and request while rendering.
//!
//! # Responsibilities
//! - Expose the current location, navigator and host page to components
//! - Track the route frame stack (resolved path, outlet) during a pass
//! - Collect post-render effect requests and redirect requests
//!
//! # Design Decisions
//! - Effects are an explicit post-render hook keyed by (key, dependency hash),
//!   not an implicit effect system; the runtime decides when to run them
//! - Redirects requested during a pass are applied by the runtime after the
//!   pass, with history replace semantics decided by the requester

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::view::Element;

use super::page::HostPage;
use super::routing::{Location, Navigator};

/// Hash a dependency tuple for an effect request.
pub fn dep_hash<T: Hash>(deps: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    deps.hash(&mut hasher);
    hasher.finish()
}

/// A post-render side effect requested during a pass.
///
/// The runtime runs it after the pass when the key is newly mounted or its
/// dependency hash changed, and forgets keys that did not render.
pub struct EffectRequest {
    pub key: String,
    pub deps: u64,
    pub run: Box<dyn FnOnce() + Send>,
}

/// A client-side redirect requested during a pass.
pub struct RedirectRequest {
    pub to: String,
    pub replace: bool,
}

struct Frame {
    resolved: String,
    outlet: Option<Element>,
}

/// Per-pass context handed to every component render.
pub struct RenderContext {
    location: Location,
    navigator: Navigator,
    page: Arc<dyn HostPage>,
    frames: Vec<Frame>,
    effects: Vec<EffectRequest>,
    redirects: Vec<RedirectRequest>,
}

impl RenderContext {
    pub fn new(location: Location, navigator: Navigator, page: Arc<dyn HostPage>) -> Self {
        Self {
            location,
            navigator,
            page,
            frames: Vec::new(),
            effects: Vec::new(),
            redirects: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn page(&self) -> &Arc<dyn HostPage> {
        &self.page
    }

    /// Resolved path of the innermost route frame, or the location path when
    /// rendering outside any frame.
    pub fn resolved_path(&self) -> &str {
        self.frames
            .last()
            .map(|f| f.resolved.as_str())
            .unwrap_or(self.location.path.as_str())
    }

    /// Enter a route frame. Paired with [`RenderContext::pop_frame`] by the
    /// rendering capability when it instantiates a scope element.
    pub fn push_frame(&mut self, resolved: String, outlet: Option<Element>) {
        self.frames.push(Frame { resolved, outlet });
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Take the innermost frame's outlet element, if any. Consumed by the
    /// first outlet rendered inside the frame.
    pub fn take_outlet(&mut self) -> Option<Element> {
        self.frames.last_mut().and_then(|f| f.outlet.take())
    }

    /// Request a post-render effect.
    pub fn effect(&mut self, key: impl Into<String>, deps: u64, run: impl FnOnce() + Send + 'static) {
        self.effects.push(EffectRequest {
            key: key.into(),
            deps,
            run: Box::new(run),
        });
    }

    /// Request a client-side redirect, applied after the pass.
    pub fn redirect(&mut self, to: impl Into<String>, replace: bool) {
        self.redirects.push(RedirectRequest {
            to: to.into(),
            replace,
        });
    }

    /// Drain collected effect requests. Called by the runtime after a pass.
    pub fn take_effects(&mut self) -> Vec<EffectRequest> {
        std::mem::take(&mut self.effects)
    }

    /// Drain collected redirect requests. Called by the runtime after a pass.
    pub fn take_redirects(&mut self) -> Vec<RedirectRequest> {
        std::mem::take(&mut self.redirects)
    }
}
