//! Headless routing backend: location matching and route composition.
//!
//! # Responsibilities
//! - Turn a compiled route tree into a router component
//! - Match the current location to a chain of route frames
//! - Compose matched frames innermost-last, filling parent outlets
//!
//! # Design Decisions
//! - First sibling match wins; sibling order is the declaration order
//! - Path routes consume their own segments; pathless layouts consume none
//! - Absolute child paths match from the location root
//! - A matched redirect requests a history replace and renders a marker

use std::sync::Arc;

use crate::capability::{HistoryMode, Navigator, RoutingBackend};
use crate::routes::{CompiledRoute, RouteContent};
use crate::view::{Component, Element};

use super::runtime::HeadlessRuntime;

/// Routing capability backed by the headless runtime's history.
pub struct HeadlessRouting {
    runtime: Arc<HeadlessRuntime>,
}

impl HeadlessRouting {
    pub fn new(runtime: Arc<HeadlessRuntime>) -> Self {
        Self { runtime }
    }
}

impl RoutingBackend for HeadlessRouting {
    fn router_element(
        &self,
        tree: Arc<[CompiledRoute]>,
        mode: HistoryMode,
        basename: Option<String>,
    ) -> Element {
        self.runtime.configure_history(mode, basename);
        Element::Component(Component::new("router", move |cx| {
            let path = cx.location().path.clone();
            match match_location(&tree, &path) {
                Some(frames) => compose(&frames),
                None => {
                    tracing::debug!(path = %path, "No route matched");
                    Element::Fragment(Vec::new())
                }
            }
        }))
    }

    fn navigator(&self) -> Navigator {
        self.runtime.navigator()
    }
}

struct MatchedFrame {
    route: CompiledRoute,
    resolved: String,
}

/// Match a location path against the tree, returning the frame chain from
/// root route to matched leaf.
fn match_location(routes: &[CompiledRoute], path: &str) -> Option<Vec<MatchedFrame>> {
    let segments = split_path(path);
    try_match(routes, &segments, 0, "")
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn try_match(
    routes: &[CompiledRoute],
    full: &[String],
    consumed: usize,
    parent_resolved: &str,
) -> Option<Vec<MatchedFrame>> {
    routes
        .iter()
        .find_map(|route| match_one(route, full, consumed, parent_resolved))
}

fn match_one(
    route: &CompiledRoute,
    full: &[String],
    consumed: usize,
    parent_resolved: &str,
) -> Option<Vec<MatchedFrame>> {
    if route.index {
        return (consumed == full.len()).then(|| {
            vec![MatchedFrame {
                route: route.clone(),
                resolved: resolved_or_root(parent_resolved),
            }]
        });
    }

    match &route.path {
        Some(path) => {
            let own = split_path(path);
            let (next_consumed, resolved) = if path.starts_with('/') {
                // Absolute paths restart matching at the location root.
                if own.len() < consumed || !segments_match(&own, &full[..], route.case_sensitive) {
                    return None;
                }
                (own.len(), normalize_resolved(path))
            } else {
                let remaining = &full[consumed..];
                if !segments_match(&own, remaining, route.case_sensitive) {
                    return None;
                }
                let resolved = format!(
                    "{}/{}",
                    parent_resolved.trim_end_matches('/'),
                    own.join("/")
                );
                (consumed + own.len(), resolved)
            };

            let frame = MatchedFrame {
                route: route.clone(),
                resolved: resolved.clone(),
            };

            if matches!(route.content, RouteContent::Redirect { .. }) {
                // Redirects are terminal and match exactly.
                return (next_consumed == full.len()).then_some(vec![frame]);
            }

            if next_consumed == full.len() {
                match try_match(&route.children, full, next_consumed, &resolved) {
                    Some(mut chain) => {
                        chain.insert(0, frame);
                        Some(chain)
                    }
                    None => Some(vec![frame]),
                }
            } else {
                let mut chain = try_match(&route.children, full, next_consumed, &resolved)?;
                chain.insert(0, frame);
                Some(chain)
            }
        }
        None => {
            // Pathless layout: consumes nothing, matches only through a child.
            let mut chain = try_match(&route.children, full, consumed, parent_resolved)?;
            chain.insert(
                0,
                MatchedFrame {
                    route: route.clone(),
                    resolved: resolved_or_root(parent_resolved),
                },
            );
            Some(chain)
        }
    }
}

fn segments_match(own: &[String], location: &[String], case_sensitive: bool) -> bool {
    if own.len() > location.len() {
        return false;
    }
    own.iter().zip(location).all(|(a, b)| {
        if case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    })
}

fn resolved_or_root(parent_resolved: &str) -> String {
    if parent_resolved.is_empty() {
        "/".to_string()
    } else {
        parent_resolved.to_string()
    }
}

fn normalize_resolved(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Compose a frame chain into one element, innermost frames filling the
/// outlets of their parents.
fn compose(frames: &[MatchedFrame]) -> Element {
    let mut acc: Option<Element> = None;
    for frame in frames.iter().rev() {
        let body = match &frame.route.content {
            RouteContent::View(element) => element.force(),
            RouteContent::Passthrough => Element::Outlet,
            RouteContent::Redirect { to } => redirect_element(to.clone()),
        };
        acc = Some(Element::Scope {
            resolved: frame.resolved.clone(),
            outlet: acc.take().map(Box::new),
            child: Box::new(body),
        });
    }
    acc.unwrap_or(Element::Fragment(Vec::new()))
}

/// Matching this element requests a history replace so the redirecting path
/// never survives as a back-navigation target.
fn redirect_element(to: String) -> Element {
    Element::Component(Component::new("navigate", move |cx| {
        cx.redirect(to.clone(), true);
        Element::node("navigate").attr("to", to.clone())
    }))
}
