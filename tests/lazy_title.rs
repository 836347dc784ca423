//! Title side effects and lazy loading over the headless backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use route_launcher::capability::HostPage;
use route_launcher::config::{LauncherOptions, PathRoute, RouteDescriptor, RouteView};
use route_launcher::headless::HeadlessApp;
use route_launcher::view::{AsyncFactory, Component, Element, LoadError};
use route_launcher::Launcher;

mod common;

use common::page;

fn lazy_route(path: &str, factory: AsyncFactory, loading: Option<Component>) -> RouteDescriptor {
    RouteDescriptor::Path(PathRoute {
        path: path.to_string(),
        case_sensitive: false,
        view: Some(RouteView::Lazy { factory, loading }),
        title: None,
        children: Vec::new(),
    })
}

#[test]
fn test_title_follows_titled_routes_only() {
    let app = HeadlessApp::new();
    let launcher = Launcher::new(
        LauncherOptions::new(vec![
            RouteDescriptor::route("/", page("home")).with_title("Home"),
            RouteDescriptor::route("/plain", page("plain")),
            RouteDescriptor::route("/contact", page("contact")).with_title("Contact"),
        ]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    assert_eq!(app.title(), "Home");

    // A route without a title leaves the previous title in place.
    app.navigator().push("/plain");
    assert_eq!(app.title(), "Home");

    app.navigator().push("/contact");
    assert_eq!(app.title(), "Contact");

    // Returning to a titled route re-applies its title.
    app.navigator().push("/");
    assert_eq!(app.title(), "Home");
}

#[test]
fn test_empty_title_is_ignored() {
    let app = HeadlessApp::new();
    app.page().set_title("Before");
    let launcher = Launcher::new(
        LauncherOptions::new(vec![
            RouteDescriptor::route("/", page("home")).with_title("")
        ]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    assert_eq!(app.title(), "Before");
}

#[test]
fn test_title_does_not_alter_the_child_output() {
    let app = HeadlessApp::new();
    let launcher = Launcher::new(
        LauncherOptions::new(vec![
            RouteDescriptor::route("/", page("home")).with_title("Home")
        ]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    let view = app.rendered("#root").expect("mounted");
    assert!(view.find("home").is_some());
}

#[tokio::test]
async fn test_lazy_route_shows_default_placeholder_until_resolved() {
    let app = HeadlessApp::new();
    let factory = AsyncFactory::new("lazy-page", || async {
        Ok(Component::new("lazy-page", |_| Element::node("lazy-page")))
    });
    let launcher = Launcher::new(
        LauncherOptions::new(vec![lazy_route("/", factory, None)]),
        app.capabilities(),
    );

    launcher.start().unwrap();

    // The factory has been started but not driven yet.
    let view = app.rendered("#root").expect("mounted");
    assert!(view.find("loading").is_some());
    assert!(view.find("lazy-page").is_none());

    app.settle().await;

    let view = app.rendered("#root").expect("rendered");
    assert!(view.find("lazy-page").is_some());
    assert!(view.find("loading").is_none());
}

#[tokio::test]
async fn test_lazy_route_honors_custom_placeholder() {
    let app = HeadlessApp::new();
    let factory = AsyncFactory::new("lazy-page", || async {
        Ok(Component::new("lazy-page", |_| Element::node("lazy-page")))
    });
    let spinner = Component::new("spinner", |_| Element::node("spinner"));
    let launcher = Launcher::new(
        LauncherOptions::new(vec![lazy_route("/", factory, Some(spinner))]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    let view = app.rendered("#root").expect("mounted");
    assert!(view.find("spinner").is_some());
    assert!(view.find("loading").is_none());
}

#[tokio::test]
async fn test_resolved_factory_never_reloads() {
    let app = HeadlessApp::new();
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = invocations.clone();
    let factory = AsyncFactory::new("users", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async {
            Ok(Component::new("users", |_| Element::node("users")))
        }
    });

    let launcher = Launcher::new(
        LauncherOptions::new(vec![
            RouteDescriptor::route("/", page("home")),
            lazy_route("/users", factory, None),
        ]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    app.navigator().push("/users");
    app.settle().await;
    assert!(app.rendered("#root").unwrap().find("users").is_some());

    // Leaving and returning re-renders the resolved component directly.
    app.navigator().push("/");
    app.navigator().push("/users");
    let view = app.rendered("#root").unwrap();
    assert!(view.find("users").is_some());
    assert!(view.find("loading").is_none());
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_factory_failure_is_surfaced_by_the_host() {
    let app = HeadlessApp::new();
    let factory = AsyncFactory::new("broken", || async {
        Err(LoadError("chunk fetch failed".to_string()))
    });
    let launcher = Launcher::new(
        LauncherOptions::new(vec![lazy_route("/", factory, None)]),
        app.capabilities(),
    );

    launcher.start().unwrap();
    app.settle().await;

    let view = app.rendered("#root").expect("rendered");
    let marker = view.find("load-error").expect("error marker");
    assert_eq!(
        marker.attr("message"),
        Some("component load failed: chunk fetch failed")
    );
}
