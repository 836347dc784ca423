//! Component and async-factory values.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use thiserror::Error;

use crate::capability::RenderContext;

use super::element::Element;

/// A named render function. Cloning shares the underlying closure, so two
/// clones of the same component compare pointer-equal for memoization
/// purposes.
#[derive(Clone)]
pub struct Component {
    name: Arc<str>,
    render: Arc<dyn Fn(&mut RenderContext) -> Element + Send + Sync>,
}

impl Component {
    pub fn new(
        name: impl Into<Arc<str>>,
        render: impl Fn(&mut RenderContext) -> Element + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            render: Arc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the render function.
    pub fn render(&self, cx: &mut RenderContext) -> Element {
        (self.render)(cx)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.name)
    }
}

/// Error surfaced by an async component factory.
///
/// The launcher core does not handle these; they propagate to whatever
/// error surface the host rendering environment provides.
#[derive(Debug, Clone, Error)]
#[error("component load failed: {0}")]
pub struct LoadError(pub String);

/// An asynchronous component factory, the `lazy` form of a route view.
///
/// Cloning shares the loader closure; [`AsyncFactory::key`] identifies the
/// factory across clones so wrapped forms can be memoized per factory.
#[derive(Clone)]
pub struct AsyncFactory {
    name: Arc<str>,
    load: Arc<dyn Fn() -> BoxFuture<'static, Result<Component, LoadError>> + Send + Sync>,
}

impl AsyncFactory {
    pub fn new<F, Fut>(name: impl Into<Arc<str>>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Component, LoadError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            load: Arc::new(move || load().boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start loading. Each call invokes the underlying factory again.
    pub fn load(&self) -> BoxFuture<'static, Result<Component, LoadError>> {
        (self.load)()
    }

    /// Stable identity of the factory reference, used as the memoization key
    /// for its wrapped form.
    pub fn key(&self) -> usize {
        Arc::as_ptr(&self.load) as *const () as usize
    }
}

impl fmt::Debug for AsyncFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncFactory({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_key_stable_across_clones() {
        let f = AsyncFactory::new("a", || async { Ok(Component::new("a", |_| Element::Outlet)) });
        let g = f.clone();
        assert_eq!(f.key(), g.key());

        let other =
            AsyncFactory::new("b", || async { Ok(Component::new("b", |_| Element::Outlet)) });
        assert_ne!(f.key(), other.key());
    }
}
