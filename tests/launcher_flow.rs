//! End-to-end launcher behavior over the headless backend.

use std::sync::Arc;

use route_launcher::config::{LauncherOptions, RouteDescriptor};
use route_launcher::headless::HeadlessApp;
use route_launcher::plugin::PluginOptions;
use route_launcher::{Launcher, LauncherError};

mod common;

use common::{page, page_with_link, RecordingPlugin};

fn launcher(app: &HeadlessApp, routes: Vec<RouteDescriptor>) -> Launcher {
    Launcher::new(LauncherOptions::new(routes), app.capabilities())
}

#[test]
fn test_mount_renders_matched_route() {
    let app = HeadlessApp::new();
    let launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);

    launcher.start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    assert!(view.find("home").is_some());
}

#[test]
fn test_missing_container_fails_loudly() {
    let app = HeadlessApp::new();
    let mut options = LauncherOptions::new(vec![RouteDescriptor::route("/", page("home"))]);
    options.root_node = "#app".to_string();
    let launcher = Launcher::new(options, app.capabilities());

    let err = launcher.start().unwrap_err();
    match err {
        LauncherError::ContainerNotFound(selector) => assert_eq!(selector, "#app"),
    }
}

#[test]
fn test_empty_routes_mount_an_empty_tree() {
    let app = HeadlessApp::new();
    launcher(&app, Vec::new()).start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    assert_eq!(view.text_content(), "");
}

#[test]
fn test_plugins_wrap_in_registration_order() {
    let app = HeadlessApp::new();
    let mut launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);
    launcher.use_plugin(RecordingPlugin::both("p1"), PluginOptions::new());
    launcher.use_plugin(RecordingPlugin::both("p2"), PluginOptions::new());

    launcher.start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    // Outer fold: the later registration wraps outside the earlier one.
    let outer_p2 = view.find("p2").expect("outer p2");
    let outer_p1 = outer_p2.find("p1").expect("p1 inside p2");
    // Inner fold: the same order repeats around the route's component.
    let inner_p2 = outer_p1.find("p2").expect("inner p2");
    let inner_p1 = inner_p2.find("p1").expect("inner p1");
    assert!(inner_p1.find("home").is_some());
}

#[test]
fn test_reversed_registration_reverses_nesting() {
    let app = HeadlessApp::new();
    let mut launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);
    launcher.use_plugin(RecordingPlugin::both("p2"), PluginOptions::new());
    launcher.use_plugin(RecordingPlugin::both("p1"), PluginOptions::new());

    launcher.start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    let outer_p1 = view.find("p1").expect("outer p1");
    assert!(outer_p1.find("p2").is_some());
}

#[test]
fn test_redirect_replaces_history() {
    let app = HeadlessApp::new();
    let launcher = launcher(
        &app,
        vec![
            RouteDescriptor::redirect("/", "/x"),
            RouteDescriptor::route("/x", page("x-page")),
        ],
    );

    launcher.start().unwrap();

    assert_eq!(app.location().path, "/x");
    let view = app.rendered("#root").expect("mounted");
    assert!(view.find("x-page").is_some());

    // The redirecting path was replaced, not pushed: back stays put.
    app.navigator().back();
    assert_eq!(app.location().path, "/x");
    assert!(app.rendered("#root").unwrap().find("x-page").is_some());
}

#[test]
fn test_sibling_branches_render_independently() {
    let app = HeadlessApp::new();
    let launcher = launcher(
        &app,
        vec![
            RouteDescriptor::segment("/a")
                .with_children(vec![RouteDescriptor::route("x", page("ax"))]),
            RouteDescriptor::segment("/b")
                .with_children(vec![RouteDescriptor::route("x", page("bx"))]),
        ],
    );

    launcher.start().unwrap();

    app.navigator().push("/a/x");
    let view = app.rendered("#root").unwrap();
    assert!(view.find("ax").is_some());
    assert!(view.find("bx").is_none());

    app.navigator().push("/b/x");
    let view = app.rendered("#root").unwrap();
    assert!(view.find("bx").is_some());
    assert!(view.find("ax").is_none());
}

#[test]
fn test_inner_plugin_runs_once_per_newly_rendered_node() {
    let app = HeadlessApp::new();
    let plugin = RecordingPlugin::inner_only("p");
    let mut launcher = launcher(
        &app,
        vec![
            RouteDescriptor::route("/", page_with_link("home", "/children")).with_children(vec![
                RouteDescriptor::route("children", page("children")),
            ]),
        ],
    );
    launcher.use_plugin(plugin.clone(), PluginOptions::new());

    launcher.start().unwrap();

    // Mount renders the wrapped home with its link; one wrap so far.
    let view = app.rendered("#root").expect("mounted");
    let wrapped_home = view.find("p").expect("wrapped home");
    assert!(wrapped_home.find("home").is_some());
    assert!(wrapped_home.find("children").is_none());
    assert_eq!(plugin.inner_count(), 1);

    // Following the link renders the child inside home's outlet, wrapping
    // the newly rendered node once. Home is not re-wrapped.
    assert!(app.click("/children"));
    let view = app.rendered("#root").expect("rendered");
    let home = view.find("home").expect("home still mounted");
    let wrapped_child = home.find("p").expect("wrapped child");
    assert!(wrapped_child.find("children").is_some());
    assert_eq!(plugin.inner_count(), 2);
}

#[test]
fn test_inner_plugins_share_one_descriptor_identity_per_node() {
    let app = HeadlessApp::new();
    let plugin = RecordingPlugin::inner_only("p");
    let mut launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);
    launcher.use_plugin(plugin.clone(), PluginOptions::new());
    launcher.use_plugin(plugin.clone(), PluginOptions::new());

    launcher.start().unwrap();

    let seen = plugin.seen_routes.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}

#[test]
#[should_panic(expected = "boom")]
fn test_plugin_panics_are_not_isolated() {
    use route_launcher::plugin::Plugin;
    use route_launcher::view::Element;

    struct BadPlugin;
    impl Plugin for BadPlugin {
        fn name(&self) -> &str {
            "bad"
        }
        fn wrap_outer(
            &self,
            _element: &Element,
            _options: &PluginOptions,
        ) -> Option<Element> {
            panic!("boom");
        }
    }

    let app = HeadlessApp::new();
    let mut launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);
    launcher.use_plugin(Arc::new(BadPlugin), PluginOptions::new());
    launcher.start().unwrap();
}

#[test]
fn test_strict_mode_wraps_the_app() {
    let app = HeadlessApp::new();
    let mut options = LauncherOptions::new(vec![RouteDescriptor::route("/", page("home"))]);
    options.strict_mode = true;
    Launcher::new(options, app.capabilities()).start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    let strict = view.find("strict-mode").expect("strict marker");
    assert!(strict.find("home").is_some());
}

#[test]
fn test_strict_mode_wraps_outside_outer_plugins() {
    let app = HeadlessApp::new();
    let mut options = LauncherOptions::new(vec![RouteDescriptor::route("/", page("home"))]);
    options.strict_mode = true;
    let mut launcher = Launcher::new(options, app.capabilities());
    launcher.use_plugin(RecordingPlugin::both("shell"), PluginOptions::new());

    launcher.start().unwrap();

    let view = app.rendered("#root").expect("mounted");
    let strict = view.find("strict-mode").expect("strict marker");
    assert!(strict.find("shell").is_some());
}

#[test]
fn test_hash_mode_and_basename_shape_the_address() {
    let hash_app = HeadlessApp::new();
    let mut options = LauncherOptions::new(Vec::new());
    options.hash = true;
    Launcher::new(options, hash_app.capabilities())
        .start()
        .unwrap();
    hash_app.navigator().push("/users");
    assert_eq!(hash_app.runtime().external_url(), "#/users");

    let based_app = HeadlessApp::new();
    let mut options = LauncherOptions::new(Vec::new());
    options.basename = Some("/app".to_string());
    Launcher::new(options, based_app.capabilities())
        .start()
        .unwrap();
    based_app.navigator().push("/users");
    assert_eq!(based_app.runtime().external_url(), "/app/users");
}

#[test]
fn test_legacy_runtime_version_still_mounts_and_navigates() {
    let app = HeadlessApp::with_version(17);
    let launcher = launcher(
        &app,
        vec![
            RouteDescriptor::route("/", page_with_link("home", "/a")),
            RouteDescriptor::route("/a", page("a-page")),
        ],
    );

    launcher.start().unwrap();
    assert!(app.rendered("#root").unwrap().find("home").is_some());

    assert!(app.click("/a"));
    assert!(app.rendered("#root").unwrap().find("a-page").is_some());
    // The legacy entry point never creates persistent roots.
    assert!(app.page().warnings().is_empty());
}

#[test]
fn test_modern_mount_suppresses_the_root_creation_warning() {
    let app = HeadlessApp::new();
    launcher(&app, vec![RouteDescriptor::route("/", page("home"))])
        .start()
        .unwrap();

    assert!(app.page().warnings().is_empty());

    // Creating a root outside the adapter emits the warning.
    use route_launcher::capability::ViewRuntime;
    let container = app.page().add_container("#bare");
    let _root = app.runtime().create_root(&container);
    assert_eq!(app.page().warnings().len(), 1);
}

#[test]
fn test_start_twice_remounts_into_the_same_root() {
    let app = HeadlessApp::new();
    let launcher = launcher(&app, vec![RouteDescriptor::route("/", page("home"))]);

    launcher.start().unwrap();
    launcher.start().unwrap();

    assert!(app.rendered("#root").unwrap().find("home").is_some());
    // Still no warnings: the adapter reused the container's root.
    assert!(app.page().warnings().is_empty());
}
