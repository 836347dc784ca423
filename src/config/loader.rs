//! Route manifest loading from disk.
//!
//! A manifest is the TOML form of a launcher configuration: a `[launcher]`
//! options table plus a `[[routes]]` tree whose components are referenced by
//! name. Names are resolved against a [`ComponentRegistry`] populated in
//! code; resolution then applies the same shape precedence code-first
//! configs get.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::{
    LauncherOptions, RouteDescriptor, RouteParts, RouteView, DEFAULT_ROOT_NODE,
};
use crate::view::{AsyncFactory, Component, Element};

/// Error type for manifest loading and resolution.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown component {name:?} referenced by route {route:?}")]
    UnknownComponent { name: String, route: String },

    #[error("route {route:?} is lazy but {name:?} is not a registered factory")]
    NotAFactory { name: String, route: String },
}

/// Parsed manifest file, not yet resolved against a registry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestFile {
    pub launcher: ManifestOptions,
    pub routes: Vec<RawRoute>,
}

/// The `[launcher]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestOptions {
    /// Use fragment-based history.
    pub hash: bool,

    /// Mount target selector.
    pub root_node: String,

    /// Wrap the app in a strict-mode marker.
    pub strict_mode: bool,

    /// Path prefix the router mounts under.
    pub basename: Option<String>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            hash: false,
            root_node: DEFAULT_ROOT_NODE.to_string(),
            strict_mode: false,
            basename: None,
        }
    }
}

/// One `[[routes]]` row: every field optional, shape decided at resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawRoute {
    pub path: Option<String>,
    pub index: bool,
    pub case_sensitive: bool,

    /// Registry name of the component, or of the factory when `lazy`.
    pub component: Option<String>,

    /// Document title applied while the route is active.
    pub title: Option<String>,

    /// Treat `component` as an async factory.
    pub lazy: bool,

    /// Registry name of the loading placeholder for a lazy route.
    pub loading: Option<String>,

    /// Redirect target. Ignored when `component` is present.
    pub redirect: Option<String>,

    pub children: Vec<RawRoute>,
}

impl RawRoute {
    /// Human-readable identifier for diagnostics.
    pub fn describe(&self) -> String {
        match (&self.path, self.index) {
            (Some(p), _) => p.clone(),
            (None, true) => "<index>".to_string(),
            (None, false) => "<layout>".to_string(),
        }
    }
}

/// Named components and factories a manifest resolves against.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Component>,
    factories: HashMap<String, AsyncFactory>,
    permissive: bool,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that synthesizes placeholder views for unknown names.
    /// Inspection tooling uses this to compile manifests without the real
    /// component set.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    pub fn component(mut self, name: impl Into<String>, component: Component) -> Self {
        self.components.insert(name.into(), component);
        self
    }

    pub fn factory(mut self, name: impl Into<String>, factory: AsyncFactory) -> Self {
        self.factories.insert(name.into(), factory);
        self
    }

    fn lookup_component(&self, name: &str) -> Option<Component> {
        self.components.get(name).cloned().or_else(|| {
            self.permissive.then(|| {
                let n = name.to_string();
                Component::new(name.to_string(), move |_| {
                    Element::node("placeholder").attr("component", n.clone())
                })
            })
        })
    }

    fn lookup_factory(&self, name: &str) -> Option<AsyncFactory> {
        self.factories.get(name).cloned().or_else(|| {
            self.permissive.then(|| {
                let n = name.to_string();
                AsyncFactory::new(name.to_string(), move || {
                    let n = n.clone();
                    async move {
                        Ok(Component::new(n.clone(), move |_| {
                            Element::node("placeholder").attr("component", n.clone())
                        }))
                    }
                })
            })
        })
    }

    fn resolve_view(&self, raw: &RawRoute) -> Result<Option<RouteView>, ManifestError> {
        let Some(name) = raw.component.as_deref() else {
            return Ok(None);
        };
        if raw.lazy {
            let factory = self
                .lookup_factory(name)
                .ok_or_else(|| ManifestError::NotAFactory {
                    name: name.to_string(),
                    route: raw.describe(),
                })?;
            let loading = match raw.loading.as_deref() {
                Some(l) => Some(self.lookup_component(l).ok_or_else(|| {
                    ManifestError::UnknownComponent {
                        name: l.to_string(),
                        route: raw.describe(),
                    }
                })?),
                None => None,
            };
            Ok(Some(RouteView::Lazy { factory, loading }))
        } else {
            let component =
                self.lookup_component(name)
                    .ok_or_else(|| ManifestError::UnknownComponent {
                        name: name.to_string(),
                        route: raw.describe(),
                    })?;
            Ok(Some(RouteView::Ready(component)))
        }
    }
}

/// Parse a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<ManifestFile, ManifestError> {
    let content = fs::read_to_string(path)?;
    let manifest: ManifestFile = toml::from_str(&content)?;
    Ok(manifest)
}

/// Resolve a parsed manifest into launcher options.
pub fn resolve_manifest(
    manifest: &ManifestFile,
    registry: &ComponentRegistry,
) -> Result<LauncherOptions, ManifestError> {
    let routes = resolve_routes(&manifest.routes, registry)?;
    Ok(LauncherOptions {
        hash: manifest.launcher.hash,
        root_node: manifest.launcher.root_node.clone(),
        strict_mode: manifest.launcher.strict_mode,
        basename: manifest.launcher.basename.clone(),
        routes,
    })
}

fn resolve_routes(
    rows: &[RawRoute],
    registry: &ComponentRegistry,
) -> Result<Vec<RouteDescriptor>, ManifestError> {
    let mut out = Vec::with_capacity(rows.len());
    for raw in rows {
        let view = registry.resolve_view(raw)?;
        let children = resolve_routes(&raw.children, registry)?;
        out.push(
            RouteParts {
                path: raw.path.clone(),
                index: raw.index,
                case_sensitive: raw.case_sensitive,
                view,
                title: raw.title.clone(),
                redirect: raw.redirect.clone(),
                children,
            }
            .resolve(),
        );
    }
    Ok(out)
}
