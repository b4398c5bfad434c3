use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of the remaining path a node's `redirect_to` requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    /// The node's segments must consume the whole remaining path
    Full,
    /// The node's segments need only be a prefix of the remaining path
    #[default]
    Prefix,
}

impl fmt::Display for PathMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMatch::Full => write!(f, "full"),
            PathMatch::Prefix => write!(f, "prefix"),
        }
    }
}

/// One entry of the static route declaration.
///
/// ```yaml
/// - path: settings
///   viewId: settings
///   guardIds: [registrar]
///   children:
///     - { path: "", redirectTo: contact, pathMatch: full }
///     - { path: contact, viewId: settings.contact }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouteDecl {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(default)]
    pub path_match: PathMatch,
    #[serde(default, alias = "canActivate", skip_serializing_if = "Vec::is_empty")]
    pub guard_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDecl>,
}

impl RouteDecl {
    /// Node bound to a view.
    pub fn view(path: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view_id: Some(view_id.into()),
            ..Self::default()
        }
    }

    /// Node that only redirects.
    pub fn redirect(path: impl Into<String>, target: impl Into<String>, path_match: PathMatch) -> Self {
        Self {
            path: path.into(),
            redirect_to: Some(target.into()),
            path_match,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn guarded(mut self, guard_id: impl Into<String>) -> Self {
        self.guard_ids.push(guard_id.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDecl>) -> Self {
        self.children = children;
        self
    }
}

/// Top-level shape of TOML declarations, which cannot be a bare array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteFile {
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

/// Serialization format of a route declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclFormat {
    Yaml,
    Json,
    Toml,
}

impl DeclFormat {
    /// Pick the format from a file extension; YAML when unknown.
    #[must_use]
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => DeclFormat::Json,
            Some("toml") => DeclFormat::Toml,
            _ => DeclFormat::Yaml,
        }
    }
}
