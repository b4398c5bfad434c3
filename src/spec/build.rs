use super::types::{PathMatch, RouteDecl};
use crate::error::ConfigError;
use crate::guard::{BoundGuard, GuardRegistry};
use crate::router::{RouteNode, RouteTree, Segment};
use crate::validator::ValidationIssue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

#[allow(clippy::expect_used)]
static PARAM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid param name regex"));

/// Validate a route declaration and build the immutable tree.
///
/// Guard ids are resolved against `guards` here, so an unknown id fails at
/// startup rather than on first navigation. Every problem is collected before
/// returning, not just the first.
pub fn build_tree(decls: &[RouteDecl], guards: &GuardRegistry) -> Result<Arc<RouteTree>, ConfigError> {
    let mut issues = Vec::new();
    let mut params_in_scope = Vec::new();
    let children = build_level(decls, "", guards, &mut params_in_scope, &mut issues);

    if !issues.is_empty() {
        for issue in &issues {
            warn!(location = %issue.location, kind = %issue.kind, message = %issue.message, "Route declaration issue");
        }
        return Err(ConfigError::Invalid(issues));
    }

    let tree = RouteTree::new(children);
    info!(
        routes_count = tree.entries().len(),
        top_level = decls.len(),
        "Route tree built"
    );
    Ok(Arc::new(tree))
}

fn build_level(
    decls: &[RouteDecl],
    parent_location: &str,
    guards: &GuardRegistry,
    params_in_scope: &mut Vec<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<RouteNode> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(decls.len());

    for (position, decl) in decls.iter().enumerate() {
        let location = if decl.path.is_empty() {
            format!("{parent_location}/(index)")
        } else {
            format!("{parent_location}/{}", decl.path)
        };

        if !seen.insert(decl.path.as_str()) {
            issues.push(ValidationIssue::new(
                &location,
                "DuplicatePath",
                format!("path '{}' is declared more than once among siblings", decl.path),
            ));
        }

        let segments = parse_segments(&decl.path, &location, issues);
        let own_params: Vec<String> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.to_string()),
                Segment::Static(_) => None,
            })
            .collect();
        for name in &own_params {
            if params_in_scope.contains(name) {
                issues.push(ValidationIssue::new(
                    &location,
                    "DuplicateParam",
                    format!("parameter '{{{name}}}' is already bound by an ancestor"),
                ));
            }
        }

        check_shape(decl, &location, position, decls.len(), issues);

        let mut bound_guards = Vec::with_capacity(decl.guard_ids.len());
        for id in &decl.guard_ids {
            match guards.get(id) {
                Some(guard) => bound_guards.push(BoundGuard::new(id.as_str(), guard)),
                None => issues.push(ValidationIssue::new(
                    &location,
                    "UnknownGuard",
                    format!("guard '{id}' is not registered"),
                )),
            }
        }

        let scope_len = params_in_scope.len();
        params_in_scope.extend(own_params);
        let child_location = if decl.path.is_empty() {
            parent_location.to_string()
        } else {
            location.clone()
        };
        let children = build_level(&decl.children, &child_location, guards, params_in_scope, issues);
        params_in_scope.truncate(scope_len);

        nodes.push(RouteNode {
            path: decl.path.clone(),
            segments,
            view_id: decl.view_id.as_deref().map(Into::into),
            redirect_to: decl.redirect_to.clone(),
            path_match: decl.path_match,
            guards: bound_guards,
            children,
        });
    }

    nodes
}

fn parse_segments(path: &str, location: &str, issues: &mut Vec<ValidationIssue>) -> Vec<Segment> {
    if path.is_empty() {
        return Vec::new();
    }
    if path.starts_with('/') || path.ends_with('/') {
        issues.push(ValidationIssue::new(
            location,
            "InvalidSegment",
            "declared paths must not start or end with '/'",
        ));
    }

    let mut segments = Vec::new();
    for raw in path.trim_matches('/').split('/') {
        if raw.is_empty() {
            issues.push(ValidationIssue::new(location, "InvalidSegment", "empty path segment"));
            continue;
        }
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) if PARAM_NAME.is_match(name) => segments.push(Segment::Param(Arc::from(name))),
            Some(name) => issues.push(ValidationIssue::new(
                location,
                "InvalidSegment",
                format!("invalid parameter name '{name}'"),
            )),
            None if raw.contains(['{', '}']) => issues.push(ValidationIssue::new(
                location,
                "InvalidSegment",
                format!("malformed parameter segment '{raw}'"),
            )),
            None => segments.push(Segment::Static(raw.to_string())),
        }
    }
    segments
}

fn check_shape(
    decl: &RouteDecl,
    location: &str,
    position: usize,
    siblings: usize,
    issues: &mut Vec<ValidationIssue>,
) {
    match (&decl.view_id, &decl.redirect_to) {
        (Some(view), Some(_)) => {
            let redirect_always_wins =
                decl.path_match == PathMatch::Prefix || decl.children.is_empty();
            if redirect_always_wins {
                issues.push(ValidationIssue::new(
                    location,
                    "UnreachableView",
                    format!("view '{view}' can never render because the node always redirects"),
                ));
            }
        }
        (None, None) if decl.children.is_empty() => {
            issues.push(ValidationIssue::new(
                location,
                "EmptyNode",
                "node has no view, no redirect and no children",
            ));
        }
        _ => {}
    }

    if decl.redirect_to.is_some() && decl.path_match == PathMatch::Prefix {
        if !decl.children.is_empty() {
            issues.push(ValidationIssue::new(
                location,
                "RedirectWithChildren",
                "a prefix redirect consumes every descendant path; its children are unreachable",
            ));
        }
        if decl.path.is_empty() && position + 1 < siblings {
            warn!(
                location = %location,
                "Empty-path prefix redirect shadows every later sibling"
            );
        }
    }
}
