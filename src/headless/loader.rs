//! Headless lazy loader: suspending components over tokio tasks.

use std::sync::{Arc, Mutex};

use crate::capability::LazyLoader;
use crate::view::{AsyncFactory, Component, Element, LoadError};

use super::runtime::HeadlessRuntime;

enum LazyState {
    Idle,
    Pending,
    Ready(Component),
    Failed(LoadError),
}

/// Wraps factories into components that render their placeholder until the
/// factory's future resolves, then re-render with the resolved component.
///
/// Resolution is never cancelled; navigating away just means nobody renders
/// the resolved component. Needs a tokio runtime on the rendering thread.
pub struct HeadlessLoader {
    runtime: Arc<HeadlessRuntime>,
}

impl HeadlessLoader {
    pub fn new(runtime: Arc<HeadlessRuntime>) -> Self {
        Self { runtime }
    }
}

impl LazyLoader for HeadlessLoader {
    fn wrap(&self, factory: AsyncFactory, loading: Component) -> Component {
        let state = Arc::new(Mutex::new(LazyState::Idle));
        let runtime = Arc::clone(&self.runtime);
        let name = format!("lazy({})", factory.name());

        Component::new(name, move |_cx| {
            let mut current = state.lock().unwrap();
            match &*current {
                LazyState::Idle => {
                    tracing::debug!(factory = factory.name(), "Starting lazy load");
                    let future = factory.load();
                    let task_state = Arc::clone(&state);
                    let task_runtime = Arc::clone(&runtime);
                    let factory_name = factory.name().to_string();
                    let handle = tokio::spawn(async move {
                        let result = future.await;
                        {
                            let mut slot = task_state.lock().unwrap();
                            *slot = match result {
                                Ok(component) => LazyState::Ready(component),
                                Err(error) => {
                                    tracing::error!(
                                        factory = %factory_name,
                                        %error,
                                        "Lazy load failed"
                                    );
                                    LazyState::Failed(error)
                                }
                            };
                        }
                        task_runtime.rerender_all();
                    });
                    runtime.track_pending(handle);
                    *current = LazyState::Pending;
                    Element::Component(loading.clone())
                }
                LazyState::Pending => Element::Component(loading.clone()),
                LazyState::Ready(component) => Element::Component(component.clone()),
                // Surfaced by this host as an error marker; the launcher
                // core does not handle factory rejection.
                LazyState::Failed(error) => {
                    Element::node("load-error").attr("message", error.to_string())
                }
            }
        })
    }
}
