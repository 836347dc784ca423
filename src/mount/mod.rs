//! Mount adapter: version-keyed selection of the rendering entry point.
//!
//! # Responsibilities
//! - Probe the rendering library's major version once, at first mount
//! - Modern libraries: create a persistent root per container, suppressing
//!   the known spurious development-mode warning during creation only
//! - Legacy libraries: call the direct render entry point
//! - Reuse roots for repeated mounts into the same container
//!
//! # Design Decisions
//! - Strategy selection is a one-time capability probe, cached on the
//!   adapter; a Launcher owns one adapter, so in normal use that is once per
//!   process while staying testable
//! - Container resolution failures are the caller's to surface; the adapter
//!   only ever receives a resolved container

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::capability::{ContainerHandle, ViewRoot, ViewRuntime};
use crate::view::Element;

/// First major version with the persistent-root entry point.
pub const MODERN_MOUNT_VERSION: u32 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MountStrategy {
    Legacy,
    PersistentRoot,
}

/// Mounts prepared view trees through the right entry point for the detected
/// library version.
pub struct MountAdapter {
    runtime: Arc<dyn ViewRuntime>,
    strategy: OnceLock<MountStrategy>,
    roots: DashMap<usize, Arc<dyn ViewRoot>>,
}

impl MountAdapter {
    pub fn new(runtime: Arc<dyn ViewRuntime>) -> Self {
        Self {
            runtime,
            strategy: OnceLock::new(),
            roots: DashMap::new(),
        }
    }

    fn strategy(&self) -> MountStrategy {
        *self.strategy.get_or_init(|| {
            let version = self.runtime.version();
            let strategy = if version >= MODERN_MOUNT_VERSION {
                MountStrategy::PersistentRoot
            } else {
                MountStrategy::Legacy
            };
            tracing::debug!(version, ?strategy, "Detected rendering library version");
            strategy
        })
    }

    /// Mount `element` into `container`.
    pub fn mount(&self, element: Element, container: &ContainerHandle) {
        match self.strategy() {
            MountStrategy::Legacy => self.runtime.render_into(element, container),
            MountStrategy::PersistentRoot => {
                let root = self
                    .roots
                    .entry(container.key())
                    .or_insert_with(|| {
                        self.runtime.set_warning_suppressed(true);
                        let root = self.runtime.create_root(container);
                        self.runtime.set_warning_suppressed(false);
                        root
                    })
                    .clone();
                root.render(element);
            }
        }
    }
}
