//! Path matching against the route tree.
//!
//! Matching is a depth-first descent in declaration order: at each level the
//! first child whose segments are a prefix of the remaining path wins, and a
//! failed descent backtracks to the next sibling. Redirect nodes produce a
//! redirect instruction instead of a leaf.
//!
//! ```rust,ignore
//! let matcher = PathMatcher::new(tree);
//! match matcher.resolve("/settings")? {
//!     MatchOutcome::Redirect(r) => assert_eq!(r.to, "/settings/contact"),
//!     MatchOutcome::Matched(route) => println!("{:?}", route.view_id()),
//! }
//! ```

use super::core::{IndexPath, ParamVec, ResolvedRoute, RouteNode, RouteTree, Segment};
use crate::location;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Redirect produced by a node carrying `redirect_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectInstruction {
    /// Canonical path that was requested
    pub from: String,
    /// Fully resolved absolute target
    pub to: String,
}

/// Successful outcome of a match.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(ResolvedRoute),
    Redirect(RedirectInstruction),
}

/// No route consumes the requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub path: String,
    /// Longest suffix of the path that no branch could consume
    pub unmatched: String,
}

enum Step {
    Leaf,
    Redirect(String),
}

/// Resolves requested paths against a shared [`RouteTree`].
///
/// Pure and deterministic: safe to call concurrently and redundantly.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    tree: Arc<RouteTree>,
}

struct Descent<'a> {
    all: &'a [String],
    indices: IndexPath,
    params: ParamVec,
    /// Smallest number of unconsumed segments seen at a dead end
    best_remaining: usize,
}

impl PathMatcher {
    #[must_use]
    pub fn new(tree: Arc<RouteTree>) -> Self {
        Self { tree }
    }

    #[must_use]
    pub fn tree(&self) -> &Arc<RouteTree> {
        &self.tree
    }

    /// Match a requested path.
    pub fn resolve(&self, path: &str) -> Result<MatchOutcome, NotFound> {
        let segments = location::normalize(path);
        let canonical = location::join(&segments);
        let started = Instant::now();

        let mut descent = Descent {
            all: &segments,
            indices: IndexPath::new(),
            params: ParamVec::new(),
            best_remaining: segments.len(),
        };
        let step = descent.descend(self.tree.root(), &segments);
        let Descent {
            indices,
            params,
            best_remaining,
            ..
        } = descent;
        let duration_us = started.elapsed().as_micros();

        match step {
            Some(Step::Leaf) => {
                let route = ResolvedRoute {
                    tree: Arc::clone(&self.tree),
                    indices,
                    segments,
                    params,
                };
                debug!(
                    path = %canonical,
                    view_id = ?route.view_id(),
                    path_params = ?route.params(),
                    duration_us,
                    "Route matched"
                );
                Ok(MatchOutcome::Matched(route))
            }
            Some(Step::Redirect(to)) => {
                debug!(path = %canonical, redirect_to = %to, duration_us, "Route redirects");
                Ok(MatchOutcome::Redirect(RedirectInstruction {
                    from: canonical,
                    to,
                }))
            }
            None => {
                let start = segments.len() - best_remaining;
                let unmatched = segments[start..].join("/");
                warn!(path = %canonical, unmatched = %unmatched, duration_us, "No route matched");
                Err(NotFound {
                    path: canonical,
                    unmatched,
                })
            }
        }
    }
}

impl Descent<'_> {
    fn descend(&mut self, node: &RouteNode, remaining: &[String]) -> Option<Step> {
        for (i, child) in node.children.iter().enumerate() {
            let Some(bound) = match_segments(&child.segments, remaining) else {
                continue;
            };
            let rest = &remaining[child.segments.len()..];

            if let Some(target) = child.redirect_to.as_deref() {
                let applies = !child.exact_match() || rest.is_empty();
                if applies {
                    let parent_consumed = &self.all[..self.all.len() - remaining.len()];
                    let mut params = self.params.clone();
                    params.extend(bound);
                    let tail: &[String] = if child.exact_match() { &[] } else { rest };
                    return Some(Step::Redirect(redirect_target(
                        target,
                        parent_consumed,
                        &params,
                        tail,
                    )));
                }
                if child.children.is_empty() {
                    self.best_remaining = self.best_remaining.min(rest.len());
                    continue;
                }
            }

            let params_len = self.params.len();
            self.indices.push(i);
            self.params.extend(bound);

            if rest.is_empty() {
                if let Some(step) = self.descend(child, rest) {
                    return Some(step);
                }
                if child.view_id.is_some() {
                    return Some(Step::Leaf);
                }
            } else if let Some(step) = self.descend(child, rest) {
                return Some(step);
            }

            self.indices.pop();
            self.params.truncate(params_len);
            self.best_remaining = self.best_remaining.min(rest.len());
        }
        None
    }
}

/// Match declared segments as a prefix of the remaining path, returning the
/// parameters they bind.
fn match_segments(declared: &[Segment], remaining: &[String]) -> Option<ParamVec> {
    if declared.len() > remaining.len() {
        return None;
    }
    let mut bound = ParamVec::new();
    for (segment, requested) in declared.iter().zip(remaining) {
        if !segment.matches(requested) {
            return None;
        }
        if let Segment::Param(name) = segment {
            bound.push((Arc::clone(name), requested.clone()));
        }
    }
    Some(bound)
}

/// Resolve a declared redirect target to an absolute path.
///
/// Absolute targets replace the whole path; relative ones are appended to the
/// path consumed by the redirecting node's parent. `{name}` placeholders are
/// filled from bound parameters and `tail` is appended for prefix redirects.
pub(crate) fn redirect_target(
    target: &str,
    parent_consumed: &[String],
    params: &ParamVec,
    tail: &[String],
) -> String {
    let mut out: Vec<String> = if target.starts_with('/') {
        Vec::new()
    } else {
        parent_consumed.to_vec()
    };
    for segment in location::normalize(target) {
        let substituted = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .and_then(|name| {
                params
                    .iter()
                    .rfind(|(k, _)| k.as_ref() == name)
                    .map(|(_, v)| v.clone())
            });
        out.push(substituted.unwrap_or(segment));
    }
    out.extend(tail.iter().cloned());
    location::join(&out)
}
