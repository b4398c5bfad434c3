//! # Router Module
//!
//! The router module holds the immutable route tree and resolves requested
//! paths against it.
//!
//! ## Overview
//!
//! - [`RouteTree`] / [`RouteNode`]: the tree built from the route declaration.
//!   Parents own their children; there are no back-pointers, so cycles cannot
//!   exist.
//! - [`PathMatcher`]: depth-first, declaration-order matching that yields a
//!   [`ResolvedRoute`] (ancestor chain plus parameters), a redirect
//!   instruction, or [`NotFound`].
//!
//! ## Example
//!
//! ```rust
//! use navguard::console::console_tree;
//! use navguard::router::{MatchOutcome, PathMatcher};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matcher = PathMatcher::new(console_tree()?);
//! match matcher.resolve("/settings/whois") {
//!     Ok(MatchOutcome::Matched(route)) => {
//!         assert_eq!(route.view_id().map(|v| v.as_str()), Some("settings.whois"));
//!         assert_eq!(route.ancestors().len(), 3);
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod core;
mod matcher;
#[cfg(test)]
mod tests;

pub use self::core::{
    Breadcrumb, IndexPath, ParamVec, ResolvedRoute, RouteNode, RouteTree, Segment, ViewId,
    MAX_INLINE_PARAMS,
};
pub use matcher::{MatchOutcome, NotFound, PathMatcher, RedirectInstruction};
