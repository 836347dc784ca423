//! Mounting capability: the rendering library's entry points.

use std::sync::Arc;

use crate::view::Element;

use super::page::ContainerHandle;

/// A persistent root bound to one container. Available from rendering
/// libraries at major version [`crate::mount::MODERN_MOUNT_VERSION`] and up.
pub trait ViewRoot: Send + Sync {
    /// Render an element into the root's container, reusing the root's
    /// render state.
    fn render(&self, element: Element);
}

/// The rendering capability consumed by the mount adapter.
pub trait ViewRuntime: Send + Sync {
    /// Major version of the rendering library. Probed once and cached by the
    /// adapter.
    fn version(&self) -> u32;

    /// Legacy whole-tree mount entry point.
    fn render_into(&self, element: Element, container: &ContainerHandle);

    /// Modern persistent-root mount entry point. May emit a spurious
    /// development-mode warning unless suppression is toggled on.
    fn create_root(&self, container: &ContainerHandle) -> Arc<dyn ViewRoot>;

    /// Toggle suppression of the known spurious root-creation warning.
    fn set_warning_suppressed(&self, suppressed: bool);
}
