//! Lazy-loading capability: code-splitting without implementing it.

use crate::view::{AsyncFactory, Component};

/// Wraps an async component factory into a component that suspends.
///
/// The returned component renders `loading` while the factory's future is
/// pending and the resolved component afterwards. Factory rejection is the
/// host environment's problem; the launcher core does not observe it.
pub trait LazyLoader: Send + Sync {
    fn wrap(&self, factory: AsyncFactory, loading: Component) -> Component;
}
