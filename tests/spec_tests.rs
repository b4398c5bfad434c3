//! Integration tests for loading route declarations from disk
//!
//! Covers the three supported formats, the `canActivate` alias, and the
//! errors surfaced for malformed or invalid declarations.

mod common;

use common::temp_files::{create_temp_json, create_temp_toml, create_temp_yaml};
use navguard::console::console_routes;
use navguard::guard::GuardRegistry;
use navguard::spec::{build_tree, load_routes, load_routes_from_str, DeclFormat, PathMatch};
use navguard::ConfigError;

const CONSOLE_YAML: &str = r#"
- path: ""
  redirectTo: /home
  pathMatch: full
- path: registrars
  viewId: registrar
- path: home
  viewId: home
  guardIds: [registrar]
- path: tlds
  viewId: tlds
  canActivate: [registrar]
- path: settings
  viewId: settings
  guardIds: [registrar]
  children:
    - { path: "", redirectTo: contact, pathMatch: full }
    - { path: contact, viewId: settings.contact }
    - { path: whois, viewId: settings.whois }
    - { path: security, viewId: settings.security }
    - { path: epp-password, viewId: settings.security }
    - { path: users, viewId: settings.users }
    - { path: registrars, viewId: settings.registrars }
"#;

#[test]
fn test_yaml_declaration_matches_builtin_console() {
    let file = create_temp_yaml(CONSOLE_YAML);
    let decls = load_routes(file.path()).unwrap();
    assert_eq!(decls, console_routes());
}

#[test]
fn test_json_declaration() {
    let file = create_temp_json(
        r#"[
            {"path": "", "redirectTo": "/home", "pathMatch": "full"},
            {"path": "home", "viewId": "home", "canActivate": ["registrar"]}
        ]"#,
    );
    let decls = load_routes(file.path()).unwrap();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].path_match, PathMatch::Full);
    assert_eq!(decls[1].guard_ids, vec!["registrar"]);
    build_tree(&decls, &GuardRegistry::console()).unwrap();
}

#[test]
fn test_toml_declaration() {
    let file = create_temp_toml(
        r#"
[[routes]]
path = "settings"
viewId = "settings"

[[routes.children]]
path = ""
redirectTo = "contact"
pathMatch = "full"

[[routes.children]]
path = "contact"
viewId = "settings.contact"
"#,
    );
    let decls = load_routes(file.path()).unwrap();
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].children.len(), 2);
    assert_eq!(decls[0].children[1].view_id.as_deref(), Some("settings.contact"));
}

#[test]
fn test_path_match_defaults_to_prefix() {
    let decls =
        load_routes_from_str("- { path: old, redirectTo: /new }", DeclFormat::Yaml).unwrap();
    assert_eq!(decls[0].path_match, PathMatch::Prefix);
}

#[test]
fn test_unknown_field_is_a_parse_error() {
    let file = create_temp_yaml("- { path: home, component: HomeComponent }");
    let err = load_routes(file.path()).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("failed to parse route declaration"));
    assert!(rendered.contains("component"));
}

#[test]
fn test_missing_file_is_reported_with_path() {
    let err = load_routes("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

#[test]
fn test_invalid_declaration_collects_issues() {
    let decls = load_routes_from_str(
        r#"
- { path: home, viewId: home, guardIds: [nobody] }
- { path: home, viewId: other }
- { path: empty }
"#,
        DeclFormat::Yaml,
    )
    .unwrap();
    let err = build_tree(&decls, &GuardRegistry::console()).unwrap_err();
    let kinds: Vec<&str> = err.issues().iter().map(|i| i.kind.as_str()).collect();
    assert!(kinds.contains(&"UnknownGuard"));
    assert!(kinds.contains(&"DuplicatePath"));
    assert!(kinds.contains(&"EmptyNode"));
    let ConfigError::Invalid(issues) = err;
    assert_eq!(issues.len(), 3);
}
