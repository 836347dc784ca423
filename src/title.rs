//! Document title side-effect wrapper.
//!
//! Renders its child unchanged. As a post-render effect tied to the frame's
//! resolved path, the navigation capability and the title value, it sets the
//! host page title whenever those change. Empty titles are ignored, and
//! nothing resets the title on the way out; navigating to a route without a
//! title leaves the previous one in place.

use crate::capability::dep_hash;
use crate::view::{Component, Element};

/// Wrap `child` so that rendering it applies `title` to the host page.
pub fn wrap(child: Element, title: String) -> Element {
    Element::Component(Component::new("route-title", move |cx| {
        if !title.is_empty() {
            let resolved = cx.resolved_path().to_string();
            let deps = dep_hash(&(resolved.as_str(), cx.navigator().id(), title.as_str()));
            let page = cx.page().clone();
            let value = title.clone();
            cx.effect(format!("title@{resolved}"), deps, move || {
                tracing::trace!(title = %value, "Applying document title");
                page.set_title(&value);
            });
        }
        child.clone()
    }))
}
