//! # Navigation Module
//!
//! Orchestrates a navigation end to end: match the path, run guards along the
//! ancestor chain, follow redirects (bounded), then hand the result to the
//! rendering layer.
//!
//! ## Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Navigator
//!     participant Matcher as PathMatcher
//!     participant Guard
//!     participant Sink as RenderSink
//!
//!     Caller->>Navigator: navigate("/tlds")
//!     Navigator->>Matcher: resolve("/tlds")
//!     Matcher-->>Navigator: ResolvedRoute (root → tlds)
//!     Navigator->>Guard: can_enter (root to leaf)
//!     alt guard redirects
//!         Guard-->>Navigator: Redirect("/registrars")
//!         Navigator->>Matcher: resolve("/registrars")
//!     else all allow
//!         Guard-->>Navigator: Allow
//!     end
//!     Navigator->>Sink: commit(view, params, ancestors)
//! ```
//!
//! ## Concurrency
//!
//! Each call to [`Navigator::navigate`] bumps a generation counter. Pending
//! guard checks of older navigations race a cancellation signal and are
//! dropped as soon as a newer navigation starts; a result that still arrives
//! late is discarded in [`Navigator`]'s settle step, so the sink only ever
//! sees the most recent navigation.

use crate::error::NavigationError;
use crate::ids::NavigationId;
use crate::router::{Breadcrumb, ParamVec, ResolvedRoute, ViewId};
use serde::Serialize;

mod cancel;
mod controller;
mod navigator;

pub use cancel::CancelToken;
pub use controller::{NavState, Navigation};
pub use navigator::Navigator;

/// A navigation that reached `Committing`.
#[derive(Debug, Clone, Serialize)]
pub struct CommittedNavigation {
    pub id: NavigationId,
    /// Path as originally requested
    pub requested: String,
    /// Canonical path after redirects; this is what the address bar shows
    pub path: String,
    /// `path` rendered as a fragment
    pub hash: String,
    pub view_id: ViewId,
    pub params: ParamVec,
    pub query: ParamVec,
    /// Every redirect target followed, in order
    pub redirects: Vec<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Full ancestor chain, for nested layouts
    #[serde(skip)]
    pub route: ResolvedRoute,
}

impl CommittedNavigation {
    /// Path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.route.param(name)
    }

    /// Views from the outermost layout down to the leaf.
    #[must_use]
    pub fn view_chain(&self) -> Vec<ViewId> {
        self.breadcrumbs.iter().map(|b| b.view_id.clone()).collect()
    }
}

/// The rendering collaborator.
///
/// Called only when a navigation settles and is still the most recent one.
pub trait RenderSink: Send + Sync {
    /// Render the committed view and update the address.
    fn commit(&self, navigation: &CommittedNavigation);

    /// Render the not-found or error view for a failed navigation.
    fn reject(&self, _requested: &str, _error: &NavigationError) {}
}

/// Sink that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn commit(&self, _navigation: &CommittedNavigation) {}
}
