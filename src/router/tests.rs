use super::matcher::redirect_target;
use super::{MatchOutcome, ParamVec, PathMatcher, ResolvedRoute};
use crate::console::{console_tree, views};
use crate::guard::GuardRegistry;
use crate::spec::{build_tree, PathMatch, RouteDecl};
use std::sync::Arc;

fn console_matcher() -> PathMatcher {
    PathMatcher::new(console_tree().unwrap())
}

fn matched(matcher: &PathMatcher, path: &str) -> ResolvedRoute {
    match matcher.resolve(path) {
        Ok(MatchOutcome::Matched(route)) => route,
        other => panic!("expected a match for {path}, got {other:?}"),
    }
}

fn redirected(matcher: &PathMatcher, path: &str) -> String {
    match matcher.resolve(path) {
        Ok(MatchOutcome::Redirect(r)) => r.to,
        other => panic!("expected a redirect for {path}, got {other:?}"),
    }
}

#[test]
fn test_root_redirects_home() {
    let matcher = console_matcher();
    assert_eq!(redirected(&matcher, ""), "/home");
    assert_eq!(redirected(&matcher, "/"), "/home");
    assert_eq!(redirected(&matcher, "#/"), "/home");
}

#[test]
fn test_full_redirect_does_not_swallow_other_paths() {
    let matcher = console_matcher();
    let route = matched(&matcher, "/tlds");
    assert_eq!(route.view_id().unwrap().as_str(), views::TLDS);
}

#[test]
fn test_settings_index_redirects_to_contact() {
    let matcher = console_matcher();
    assert_eq!(redirected(&matcher, "/settings"), "/settings/contact");
    assert_eq!(redirected(&matcher, "/settings/"), "/settings/contact");
}

#[test]
fn test_nested_leaf_has_full_ancestor_chain() {
    let matcher = console_matcher();
    let route = matched(&matcher, "/settings/users");
    let chain: Vec<&str> = route.ancestors().iter().map(|n| n.path()).collect();
    assert_eq!(chain, vec!["", "settings", "users"]);
    assert_eq!(route.leaf().view_id().unwrap().as_str(), views::SETTINGS_USERS);
    assert_eq!(route.parent_path().as_deref(), Some("/settings"));

    let crumbs: Vec<String> = route.breadcrumbs().into_iter().map(|b| b.path).collect();
    assert_eq!(crumbs, vec!["/settings", "/settings/users"]);
}

#[test]
fn test_aliased_leaves_share_a_view() {
    let matcher = console_matcher();
    let security = matched(&matcher, "/settings/security");
    let epp = matched(&matcher, "/settings/epp-password");
    assert_eq!(security.view_id(), epp.view_id());
    assert_ne!(security.indices(), epp.indices());
}

#[test]
fn test_same_segment_at_different_depths() {
    let matcher = console_matcher();
    let top = matched(&matcher, "/registrars");
    let nested = matched(&matcher, "/settings/registrars");
    assert_eq!(top.view_id().unwrap().as_str(), views::REGISTRAR);
    assert_eq!(nested.view_id().unwrap().as_str(), views::SETTINGS_REGISTRARS);
}

#[test]
fn test_not_found_reports_unmatched_remainder() {
    let matcher = console_matcher();
    let err = matcher.resolve("/settings/nope/deeper").unwrap_err();
    assert_eq!(err.path, "/settings/nope/deeper");
    assert_eq!(err.unmatched, "nope/deeper");

    let err = matcher.resolve("/unknown").unwrap_err();
    assert_eq!(err.unmatched, "unknown");

    // A leaf without children cannot consume extra segments.
    let err = matcher.resolve("/tlds/extra").unwrap_err();
    assert_eq!(err.unmatched, "extra");
}

#[test]
fn test_every_declared_leaf_matches_itself() {
    let tree = console_tree().unwrap();
    let matcher = PathMatcher::new(Arc::clone(&tree));
    for (path, node) in tree.entries() {
        let is_leaf = node.children().is_empty();
        if !is_leaf || node.view_id().is_none() || node.redirect_to().is_some() {
            continue;
        }
        let route = matched(&matcher, &path);
        assert!(std::ptr::eq(route.leaf(), node), "{path} resolved to another node");
        assert!(std::ptr::eq(route.ancestors()[0], tree.root()));
    }
}

#[test]
fn test_path_params_bound_along_the_chain() {
    let decls = vec![RouteDecl::view("tlds/{tld}", "tld").with_children(vec![
        RouteDecl::redirect("", "zones", PathMatch::Full),
        RouteDecl::view("zones", "tld.zones"),
        RouteDecl::view("zones/{zone}", "tld.zone"),
    ])];
    let matcher = PathMatcher::new(build_tree(&decls, &GuardRegistry::new()).unwrap());

    let route = matched(&matcher, "/tlds/example/zones/a%20b");
    assert_eq!(route.param("tld"), Some("example"));
    assert_eq!(route.param("zone"), Some("a b"));
    assert_eq!(route.view_id().unwrap().as_str(), "tld.zone");

    assert_eq!(redirected(&matcher, "/tlds/example"), "/tlds/example/zones");
}

#[test]
fn test_backtracks_to_later_sibling() {
    let decls = vec![
        RouteDecl::view("a/{x}", "ax").with_children(vec![RouteDecl::view("only", "ax.only")]),
        RouteDecl::view("a/b", "ab").with_children(vec![RouteDecl::view("c", "ab.c")]),
    ];
    let matcher = PathMatcher::new(build_tree(&decls, &GuardRegistry::new()).unwrap());
    let route = matched(&matcher, "/a/b/c");
    assert_eq!(route.view_id().unwrap().as_str(), "ab.c");
    assert!(route.params().is_empty());
}

#[test]
fn test_prefix_redirect_keeps_remainder() {
    let decls = vec![
        RouteDecl::redirect("old", "/new", PathMatch::Prefix),
        RouteDecl::view("new", "new").with_children(vec![RouteDecl::view("x", "new.x")]),
    ];
    let matcher = PathMatcher::new(build_tree(&decls, &GuardRegistry::new()).unwrap());
    assert_eq!(redirected(&matcher, "/old"), "/new");
    assert_eq!(redirected(&matcher, "/old/x"), "/new/x");
}

#[test]
fn test_exact_redirect_on_layout_node() {
    let mut shell = RouteDecl::view("shell", "shell")
        .with_children(vec![RouteDecl::view("inner", "shell.inner")]);
    shell.redirect_to = Some("inner".into());
    shell.path_match = PathMatch::Full;
    let matcher = PathMatcher::new(build_tree(&[shell], &GuardRegistry::new()).unwrap());

    assert_eq!(redirected(&matcher, "/shell"), "/inner");
    let route = matched(&matcher, "/shell/inner");
    assert_eq!(route.view_id().unwrap().as_str(), "shell.inner");
}

#[test]
fn test_componentless_group_requires_child() {
    let group = RouteDecl {
        path: "admin".into(),
        ..RouteDecl::default()
    }
    .with_children(vec![RouteDecl::view("users", "admin.users")]);
    let matcher = PathMatcher::new(build_tree(&[group], &GuardRegistry::new()).unwrap());

    assert!(matcher.resolve("/admin").is_err());
    let route = matched(&matcher, "/admin/users");
    assert_eq!(route.breadcrumbs().len(), 1);
    assert_eq!(route.parent_path(), None);
}

#[test]
fn test_node_at_lookup() {
    let tree = console_tree().unwrap();
    assert!(std::ptr::eq(tree.node_at("").unwrap(), tree.root()));
    let contact = tree.node_at("settings/contact").unwrap();
    assert_eq!(contact.view_id().unwrap().as_str(), views::SETTINGS_CONTACT);
    let dotted = tree.node_at("settings.contact").unwrap();
    assert!(std::ptr::eq(contact, dotted));
    assert!(tree.node_at("settings/missing").is_none());
}

#[test]
fn test_redirect_target_resolution() {
    let mut params = ParamVec::new();
    params.push((Arc::from("id"), "42".to_string()));
    let parent = vec!["a".to_string()];

    assert_eq!(redirect_target("/x", &parent, &params, &[]), "/x");
    assert_eq!(redirect_target("x", &parent, &params, &[]), "/a/x");
    assert_eq!(redirect_target("items/{id}", &parent, &params, &[]), "/a/items/42");
    assert_eq!(redirect_target("{missing}", &[], &params, &[]), "/%7Bmissing%7D");
    assert_eq!(
        redirect_target("/x", &[], &params, &["t".to_string()]),
        "/x/t"
    );
}

#[test]
fn test_matching_is_repeatable() {
    let matcher = console_matcher();
    let a = matched(&matcher, "/settings/whois");
    let b = matched(&matcher, "/settings/whois");
    assert_eq!(a.indices(), b.indices());
    assert_eq!(a.path(), b.path());
}
