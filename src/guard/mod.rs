//! # Guard Module
//!
//! Guards gate entry into route nodes based on external session state.
//!
//! ## Protocol
//!
//! 1. The navigation controller matches a path to an ancestor chain
//! 2. Guards attached to the chain are evaluated root to leaf, in declaration order
//! 3. The first [`GuardDecision::Redirect`] stops evaluation; deeper guards never run
//! 4. If every guard allows, the navigation commits
//!
//! Guards are looked up by id exactly once, when the tree is built from the
//! declaration (see [`GuardRegistry`]). An unknown id is a configuration error,
//! never a navigation-time failure.
//!
//! ## Writing a guard
//!
//! ```rust
//! use async_trait::async_trait;
//! use navguard::guard::{Guard, GuardContext, GuardDecision};
//!
//! struct MaintenanceGuard;
//!
//! #[async_trait]
//! impl Guard for MaintenanceGuard {
//!     async fn can_enter(&self, _ctx: &GuardContext<'_>) -> GuardDecision {
//!         GuardDecision::Redirect("/maintenance".into())
//!     }
//!
//!     fn fallback(&self) -> &str {
//!         "/maintenance"
//!     }
//! }
//! ```
//!
//! A guard must be idempotent and must not mutate route state. It may be
//! attached to any number of nodes.

use crate::router::{ResolvedRoute, RouteNode};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

mod registrar;
mod session;

pub use registrar::{RegistrarGuard, REGISTRAR_SELECTION_PATH};
pub use session::{Session, StaticSession};

/// Outcome of a single guard check.
///
/// There is no "undecided" outcome: a guard that cannot decide redirects to
/// its fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// What a guard sees while deciding.
pub struct GuardContext<'a> {
    /// Canonical path being entered
    pub path: &'a str,
    /// Full match the navigation is trying to commit
    pub route: &'a ResolvedRoute,
    /// The node carrying the guard
    pub node: &'a RouteNode,
    /// External session collaborator
    pub session: &'a dyn Session,
}

/// A named asynchronous predicate gating entry into a node.
#[async_trait]
pub trait Guard: Send + Sync {
    /// Decide whether the navigation may enter `ctx.node`.
    async fn can_enter(&self, ctx: &GuardContext<'_>) -> GuardDecision;

    /// Safe redirect target used when the guard cannot answer in time.
    fn fallback(&self) -> &str;
}

/// Identifier a node uses to reference a guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GuardId(Arc<str>);

impl GuardId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GuardId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for GuardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guard resolved at build time and attached to a node.
#[derive(Clone)]
pub struct BoundGuard {
    pub id: GuardId,
    pub guard: Arc<dyn Guard>,
}

impl BoundGuard {
    pub fn new(id: impl Into<GuardId>, guard: Arc<dyn Guard>) -> Self {
        Self {
            id: id.into(),
            guard,
        }
    }
}

impl fmt::Debug for BoundGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundGuard")
            .field("id", &self.id)
            .field("fallback", &self.guard.fallback())
            .finish()
    }
}

/// The closed set of guards a route declaration may reference.
///
/// Consulted only by [`crate::spec::build_tree`].
#[derive(Clone, Default)]
pub struct GuardRegistry {
    guards: HashMap<String, Arc<dyn Guard>>,
}

impl GuardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for the registrar console: `registrar` -> [`RegistrarGuard`].
    #[must_use]
    pub fn console() -> Self {
        let mut registry = Self::new();
        registry.register("registrar", Arc::new(RegistrarGuard::default()));
        registry
    }

    /// Register a guard under `id`, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, guard: Arc<dyn Guard>) -> &mut Self {
        self.guards.insert(id.into(), guard);
        self
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, guard: Arc<dyn Guard>) -> Self {
        self.register(id, guard);
        self
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Guard>> {
        self.guards.get(id).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.guards.contains_key(id)
    }
}

impl fmt::Debug for GuardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.guards.keys().collect();
        ids.sort();
        f.debug_struct("GuardRegistry").field("ids", &ids).finish()
    }
}
