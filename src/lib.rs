//! # navguard
//!
//! **navguard** is the navigation authorization layer of a hash-addressed
//! administrative console: it maps paths to views, keeps certain views behind
//! an active-session precondition, and nests a settings area under a common
//! parent.
//!
//! ## Overview
//!
//! A static route declaration is loaded once at startup and built into an
//! immutable route tree. Each navigation request is matched against the tree,
//! the guards along the matched ancestor chain are evaluated root to leaf, and
//! redirects (from index routes or from guards) are followed up to a fixed
//! bound. The winning view, its parameters and its ancestor chain are then
//! handed to the rendering layer.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Route declaration types, loading (YAML/JSON/TOML) and tree construction
//! - **[`router`]** - The route tree and the path matcher
//! - **[`guard`]** - The asynchronous guard protocol and the registrar guard
//! - **[`navigation`]** - The navigation state machine and the shared [`Navigator`]
//! - **[`location`]** - Fragment addressing and path normalisation
//! - **[`console`]** - The registrar console's route declaration
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven configuration
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Matching
//!     Matching --> Guarding: leaf matched
//!     Matching --> Redirecting: index/redirect route
//!     Matching --> Settled: not found
//!     Guarding --> Redirecting: guard redirect
//!     Guarding --> Committing: all guards allow
//!     Redirecting --> Matching: within bound
//!     Redirecting --> Settled: redirect loop
//!     Committing --> Settled
//!     Settled --> [*]
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use navguard::console::console_tree;
//! use navguard::guard::StaticSession;
//! use navguard::navigation::{Navigator, NullSink};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let navigator = Navigator::new(
//!     console_tree()?,
//!     Arc::new(StaticSession::with_registrar("TheRegistrar")),
//!     Arc::new(NullSink),
//! );
//! let committed = navigator.navigate("#/settings").await?;
//! assert_eq!(committed.path, "/settings/contact");
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Only [`ConfigError`] halts anything (tree construction at startup).
//! [`NavigationError`] values are terminal states of one navigation and are
//! rendered as not-found or error views; guard rejections are redirects, not
//! errors.

pub mod cli;
pub mod console;
pub mod error;
pub mod guard;
pub mod ids;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod router;
pub mod runtime_config;
pub mod spec;
pub mod validator;

pub use error::{ConfigError, NavigationError, SessionError};
pub use guard::{Guard, GuardContext, GuardDecision, GuardRegistry, Session};
pub use navigation::{CommittedNavigation, Navigator, RenderSink};
pub use router::{PathMatcher, ResolvedRoute, RouteNode, RouteTree};
pub use spec::{build_tree, load_routes, RouteDecl};
