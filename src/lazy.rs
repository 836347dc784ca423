//! Memoization of lazily loaded components.
//!
//! Wrapping an async factory must be stable across build passes: rebuilding
//! the tree with the same factory reference has to yield the same wrapped
//! component, or an already-resolved view would fall back to its loading
//! placeholder and remount. The cache keys wrapped forms by factory identity
//! and lives as long as its Launcher.

use std::sync::Arc;

use dashmap::DashMap;

use crate::capability::LazyLoader;
use crate::view::{AsyncFactory, Component};

/// Wrapped-component cache, keyed by factory reference.
#[derive(Clone, Default)]
pub struct LazyCache {
    wrapped: Arc<DashMap<usize, Component>>,
}

impl LazyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped form of `factory`, wrapping it on first use.
    pub fn resolve(
        &self,
        loader: &Arc<dyn LazyLoader>,
        factory: &AsyncFactory,
        loading: Component,
    ) -> Component {
        self.wrapped
            .entry(factory.key())
            .or_insert_with(|| {
                tracing::debug!(factory = factory.name(), "Wrapping lazy component");
                loader.wrap(factory.clone(), loading)
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.wrapped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrapped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::view::Element;

    struct CountingLoader(AtomicUsize);

    impl LazyLoader for CountingLoader {
        fn wrap(&self, factory: AsyncFactory, _loading: Component) -> Component {
            self.0.fetch_add(1, Ordering::SeqCst);
            Component::new(format!("lazy({})", factory.name()), |_| Element::Outlet)
        }
    }

    fn factory(name: &'static str) -> AsyncFactory {
        AsyncFactory::new(name, move || async move {
            Ok(Component::new(name, |_| Element::Outlet))
        })
    }

    #[test]
    fn test_same_factory_wrapped_once() {
        let cache = LazyCache::new();
        let loader: Arc<dyn LazyLoader> = Arc::new(CountingLoader(AtomicUsize::new(0)));
        let f = factory("a");

        let first = cache.resolve(&loader, &f, Component::new("l", |_| Element::Outlet));
        let second = cache.resolve(&loader, &f.clone(), Component::new("l", |_| Element::Outlet));

        assert_eq!(first.name(), second.name());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_factories_wrapped_separately() {
        let cache = LazyCache::new();
        let counting = Arc::new(CountingLoader(AtomicUsize::new(0)));
        let loader: Arc<dyn LazyLoader> = counting.clone();

        cache.resolve(&loader, &factory("a"), Component::new("l", |_| Element::Outlet));
        cache.resolve(&loader, &factory("b"), Component::new("l", |_| Element::Outlet));

        assert_eq!(counting.0.load(Ordering::SeqCst), 2);
    }
}
