//! Headless rendering runtime.
//!
//! # Responsibilities
//! - Instantiate element trees into concrete view nodes
//! - Track active mounts and re-render them on navigation and on lazy
//!   resolution
//! - Apply redirects requested during a pass, with a hop limit
//! - Run post-render effects when their dependencies change, forgetting
//!   effects whose views did not render
//!
//! # Design Decisions
//! - Passes are synchronous on the calling thread; mutation and rendering
//!   never overlap a held lock
//! - Both mount entry points (legacy render, persistent root) funnel into
//!   the same mount registry, so navigation re-renders either kind

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tokio::task::JoinHandle;

use crate::capability::{
    ContainerHandle, EffectRequest, HistoryMode, HostPage, Location, NavigateOptions, Navigator,
    NavigatorApi, ViewRoot, ViewRuntime,
};
use crate::view::{Element, ViewNode};

use super::history::HistoryStack;
use super::page::HeadlessPage;

/// Redirect chains longer than this are cut off and logged.
const MAX_REDIRECT_HOPS: usize = 16;

/// Warning the modern mount entry point emits when root creation is not
/// suppressed by the adapter.
pub const ROOT_CREATION_WARNING: &str = "persistent root created outside a client entry point";

#[derive(Clone)]
struct Mount {
    element: Element,
    container: ContainerHandle,
}

/// The in-memory rendering library.
pub struct HeadlessRuntime {
    version: u32,
    page: Arc<HeadlessPage>,
    me: Weak<HeadlessRuntime>,
    navigator: Navigator,
    history: Mutex<HistoryStack>,
    mounts: Mutex<Vec<Mount>>,
    effect_deps: Mutex<HashMap<usize, HashMap<String, u64>>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl HeadlessRuntime {
    pub fn new(version: u32, page: Arc<HeadlessPage>) -> Arc<Self> {
        Arc::new_cyclic(|me: &Weak<HeadlessRuntime>| HeadlessRuntime {
            version,
            page,
            me: me.clone(),
            navigator: Navigator::new(Arc::new(RuntimeNavigator { runtime: me.clone() })),
            history: Mutex::new(HistoryStack::new()),
            mounts: Mutex::new(Vec::new()),
            effect_deps: Mutex::new(HashMap::new()),
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn page(&self) -> &Arc<HeadlessPage> {
        &self.page
    }

    /// The navigation handle. The same capability object for the lifetime of
    /// the runtime, so its identity is usable in effect dependencies.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn location(&self) -> Location {
        Location::new(self.history.lock().unwrap().current())
    }

    /// Address-bar form of the current location.
    pub fn external_url(&self) -> String {
        self.history.lock().unwrap().external_url()
    }

    pub(crate) fn configure_history(&self, mode: HistoryMode, basename: Option<String>) {
        self.history.lock().unwrap().configure(mode, basename);
    }

    pub(crate) fn navigate(&self, to: &str, replace: bool) {
        {
            let mut history = self.history.lock().unwrap();
            if replace {
                history.replace(to);
            } else {
                history.push(to);
            }
        }
        tracing::debug!(to, replace, "Navigated");
        self.rerender_all();
    }

    pub(crate) fn go_back(&self) {
        let moved = self.history.lock().unwrap().back();
        if moved {
            self.rerender_all();
        }
    }

    /// Track a lazy-resolution task so `settle` can wait for it.
    pub(crate) fn track_pending(&self, handle: JoinHandle<()>) {
        self.pending.lock().unwrap().push(handle);
    }

    /// Wait until no lazy-resolution task is in flight. Completing tasks
    /// re-render, which may start new tasks; the loop drains those too.
    pub async fn settle(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> =
                self.pending.lock().unwrap().drain(..).collect();
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                let _ = handle.await;
            }
        }
    }

    fn register_mount(&self, element: Element, container: &ContainerHandle) {
        let mut mounts = self.mounts.lock().unwrap();
        let mount = Mount {
            element,
            container: container.clone(),
        };
        match mounts
            .iter_mut()
            .find(|m| m.container.key() == container.key())
        {
            Some(existing) => *existing = mount,
            None => mounts.push(mount),
        }
    }

    pub(crate) fn rerender_all(&self) {
        let mounts = self.mounts.lock().unwrap().clone();
        for mount in &mounts {
            self.render_mount(mount);
        }
    }

    fn render_mount(&self, mount: &Mount) {
        let mut hops = 0;
        loop {
            let mut cx = crate::capability::RenderContext::new(
                self.location(),
                self.navigator(),
                self.page.clone() as Arc<dyn HostPage>,
            );
            let children = instantiate(&mount.element, &mut cx);

            if let Some(redirect) = cx.take_redirects().into_iter().next() {
                hops += 1;
                if hops <= MAX_REDIRECT_HOPS {
                    let mut history = self.history.lock().unwrap();
                    if redirect.replace {
                        history.replace(&redirect.to);
                    } else {
                        history.push(&redirect.to);
                    }
                    drop(history);
                    tracing::debug!(to = %redirect.to, replace = redirect.replace, "Redirected");
                    continue;
                }
                tracing::warn!(
                    to = %redirect.to,
                    "Redirect chain exceeded {MAX_REDIRECT_HOPS} hops; rendering as-is"
                );
            }

            mount.container.set_contents(ViewNode::Node {
                tag: "container".to_string(),
                attrs: [(
                    "selector".to_string(),
                    mount.container.selector().to_string(),
                )]
                .into(),
                children,
            });
            self.run_effects(mount.container.key(), cx.take_effects());
            break;
        }
    }

    /// Run effects whose key is new or whose dependency hash changed, and
    /// forget keys that did not render this pass.
    fn run_effects(&self, container_key: usize, effects: Vec<EffectRequest>) {
        let mut runnable = Vec::new();
        {
            let mut all = self.effect_deps.lock().unwrap();
            let seen = all.entry(container_key).or_default();
            let mut next = HashMap::new();
            for effect in effects {
                let changed = seen.get(&effect.key) != Some(&effect.deps);
                next.insert(effect.key.clone(), effect.deps);
                if changed {
                    runnable.push(effect.run);
                }
            }
            *seen = next;
        }
        for run in runnable {
            run();
        }
    }
}

impl ViewRuntime for HeadlessRuntime {
    fn version(&self) -> u32 {
        self.version
    }

    fn render_into(&self, element: Element, container: &ContainerHandle) {
        self.register_mount(element, container);
        self.rerender_all();
    }

    fn create_root(&self, container: &ContainerHandle) -> Arc<dyn ViewRoot> {
        self.page.emit_warning(ROOT_CREATION_WARNING);
        Arc::new(HeadlessRoot {
            runtime: self.me.clone(),
            container: container.clone(),
        })
    }

    fn set_warning_suppressed(&self, suppressed: bool) {
        self.page.set_warning_suppressed(suppressed);
    }
}

/// Persistent root bound to one container.
struct HeadlessRoot {
    runtime: Weak<HeadlessRuntime>,
    container: ContainerHandle,
}

impl ViewRoot for HeadlessRoot {
    fn render(&self, element: Element) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.register_mount(element, &self.container);
            runtime.rerender_all();
        }
    }
}

struct RuntimeNavigator {
    runtime: Weak<HeadlessRuntime>,
}

impl NavigatorApi for RuntimeNavigator {
    fn navigate(&self, to: &str, options: NavigateOptions) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.navigate(to, options.replace);
        }
    }

    fn back(&self) {
        if let Some(runtime) = self.runtime.upgrade() {
            runtime.go_back();
        }
    }

    fn location(&self) -> Location {
        match self.runtime.upgrade() {
            Some(runtime) => runtime.location(),
            None => Location::new("/"),
        }
    }
}

/// Turn an element into concrete view nodes within one pass.
fn instantiate(element: &Element, cx: &mut crate::capability::RenderContext) -> Vec<ViewNode> {
    match element {
        Element::Text(text) => vec![ViewNode::Text(text.clone())],
        Element::Node {
            tag,
            attrs,
            children,
        } => {
            let mut kids = Vec::new();
            for child in children {
                kids.extend(instantiate(child, cx));
            }
            vec![ViewNode::Node {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: kids,
            }]
        }
        Element::Fragment(children) => {
            let mut out = Vec::new();
            for child in children {
                out.extend(instantiate(child, cx));
            }
            out
        }
        Element::Component(component) => {
            let rendered = component.render(cx);
            instantiate(&rendered, cx)
        }
        Element::Outlet => match cx.take_outlet() {
            Some(inner) => instantiate(&inner, cx),
            None => Vec::new(),
        },
        Element::Scope {
            resolved,
            outlet,
            child,
        } => {
            cx.push_frame(resolved.clone(), outlet.as_deref().cloned());
            let out = instantiate(child, cx);
            cx.pop_frame();
            out
        }
    }
}
