//! Advisory route validation.
//!
//! # Responsibilities
//! - Semantic checks over raw manifest rows and resolved descriptor trees
//! - Report findings a config author probably wants to know about
//!
//! # Design Decisions
//! - Returns all findings, not just the first
//! - Advisory only: the shape precedence rules are never changed by
//!   validation, so a "malformed" descriptor still compiles to whatever the
//!   precedence rules produce

use std::collections::HashSet;
use std::fmt;

use crate::config::loader::RawRoute;
use crate::config::schema::RouteDescriptor;

/// One validation finding, located by the route path breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationNote {
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

fn note(notes: &mut Vec<ValidationNote>, location: &str, message: impl Into<String>) {
    notes.push(ValidationNote {
        location: location.to_string(),
        message: message.into(),
    });
}

/// Validate raw manifest rows, before shape precedence is applied. Catches
/// field combinations that precedence silently resolves away.
pub fn validate_raw(rows: &[RawRoute]) -> Vec<ValidationNote> {
    let mut notes = Vec::new();
    walk_raw(rows, "", &mut notes);
    notes
}

fn walk_raw(rows: &[RawRoute], parent: &str, notes: &mut Vec<ValidationNote>) {
    for raw in rows {
        let loc = format!("{}/{}", parent, raw.describe().trim_start_matches('/'));

        if raw.redirect.is_some() && raw.component.is_some() {
            note(notes, &loc, "redirect is ignored because a component is present");
        }
        if raw.redirect.is_some() && raw.component.is_none() {
            if raw.path.is_none() {
                note(notes, &loc, "redirect route has no path and can never match");
            }
            if !raw.children.is_empty() {
                note(notes, &loc, "redirect routes are terminal; children are unreachable");
            }
        }
        if raw.index && !raw.children.is_empty() {
            note(notes, &loc, "index routes are terminal; children are ignored");
        }
        if raw.index && raw.title.is_some() {
            note(notes, &loc, "title is only honored on path routes");
        }
        if raw.lazy && raw.component.is_none() {
            note(notes, &loc, "lazy is set but there is no component to load");
        }
        if raw.loading.is_some() && !raw.lazy {
            note(notes, &loc, "loading placeholder is only used by lazy routes");
        }

        walk_raw(&raw.children, &loc, notes);
    }
}

/// Validate a resolved descriptor tree. Run by the launcher at start and by
/// the inspection CLI.
pub fn validate_routes(routes: &[RouteDescriptor]) -> Vec<ValidationNote> {
    let mut notes = Vec::new();
    walk_routes(routes, "", &mut notes);
    notes
}

fn walk_routes(routes: &[RouteDescriptor], parent: &str, notes: &mut Vec<ValidationNote>) {
    let mut seen_paths: HashSet<&str> = HashSet::new();
    for d in routes {
        let label = d.path().unwrap_or(if d.is_index() { "<index>" } else { "<layout>" });
        let loc = format!("{}/{}", parent, label.trim_start_matches('/'));

        if let Some(p) = d.path() {
            if !seen_paths.insert(p) {
                note(notes, &loc, "duplicate sibling path; only the first matches");
            }
        }

        match d {
            RouteDescriptor::Redirect(r) if r.path.is_none() => {
                note(notes, &loc, "redirect route has no path and can never match");
            }
            RouteDescriptor::Layout(l) => {
                if l.view.is_none() && l.children.is_empty() {
                    note(notes, &loc, "pass-through route renders nothing and hosts nothing");
                } else if l.view.is_none() {
                    note(
                        notes,
                        &loc,
                        "pathless pass-through route; children are only reachable through their own paths",
                    );
                }
            }
            _ => {}
        }

        walk_routes(d.children(), &loc, notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LayoutRoute, RedirectRoute};

    #[test]
    fn test_raw_redirect_with_component_noted() {
        let rows = vec![RawRoute {
            path: Some("/x".into()),
            component: Some("x".into()),
            redirect: Some("/y".into()),
            ..Default::default()
        }];
        let notes = validate_raw(&rows);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("redirect is ignored"));
    }

    #[test]
    fn test_raw_collects_all_findings() {
        let rows = vec![
            RawRoute {
                redirect: Some("/y".into()),
                children: vec![RawRoute {
                    path: Some("lost".into()),
                    ..Default::default()
                }],
                ..Default::default()
            },
            RawRoute {
                index: true,
                title: Some("T".into()),
                ..Default::default()
            },
        ];
        let notes = validate_raw(&rows);
        // no-path redirect, unreachable children, index title.
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_duplicate_sibling_paths_noted() {
        let routes = vec![
            RouteDescriptor::segment("/a"),
            RouteDescriptor::segment("/a"),
        ];
        let notes = validate_routes(&routes);
        assert!(notes.iter().any(|n| n.message.contains("duplicate")));
    }

    #[test]
    fn test_dead_passthrough_noted() {
        let routes = vec![RouteDescriptor::Layout(LayoutRoute {
            view: None,
            children: vec![RouteDescriptor::segment("inner")],
        })];
        let notes = validate_routes(&routes);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("pathless pass-through"));
    }

    #[test]
    fn test_pathless_redirect_noted() {
        let routes = vec![RouteDescriptor::Redirect(RedirectRoute {
            path: None,
            to: "/x".into(),
        })];
        let notes = validate_routes(&routes);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_clean_config_has_no_notes() {
        let routes = vec![RouteDescriptor::route(
            "/",
            crate::view::Component::new("home", |_| crate::view::Element::Outlet),
        )];
        assert!(validate_routes(&routes).is_empty());
    }
}
