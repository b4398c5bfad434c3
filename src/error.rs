//! Error types for route construction and navigation.
//!
//! Only [`ConfigError`] is meant to halt anything: it is returned while the
//! route tree is built at startup. [`NavigationError`] values are terminal
//! states of a single navigation and are handed to the rendering layer.

use crate::validator::ValidationIssue;
use serde::Serialize;

/// The route declaration cannot be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("route declaration is invalid ({} issue(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<ValidationIssue>),
}

impl ConfigError {
    /// All issues collected during the build.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ConfigError::Invalid(issues) => issues,
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Terminal failure of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationError {
    /// No route matches. `unmatched` is the remainder the matcher could not consume.
    #[error("no route matches '{path}' (unmatched: '{unmatched}')")]
    NotFound { path: String, unmatched: String },
    /// The redirect bound was exceeded. `hops` lists every path visited in order.
    #[error("redirect loop while navigating to '{path}' after {} hop(s)", .hops.len())]
    RedirectLoop { path: String, hops: Vec<String> },
    /// A newer navigation started before this one settled.
    #[error("navigation superseded by a newer request")]
    Superseded,
}

/// The session collaborator could not answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}
