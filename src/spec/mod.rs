//! # Route Declaration Module
//!
//! The route declaration is the sole configuration surface: an ordered list
//! of entries, each naming a path, an optional view, an optional redirect,
//! a `pathMatch` mode, guard ids and nested children. It is loaded once at
//! startup ([`load_routes`]) and turned into an immutable
//! [`RouteTree`](crate::router::RouteTree) by [`build_tree`], which rejects
//! malformed declarations with a [`ConfigError`](crate::error::ConfigError).

mod build;
mod load;
mod types;

pub use build::build_tree;
pub use load::{load_routes, load_routes_from_str};
pub use types::{DeclFormat, PathMatch, RouteDecl, RouteFile};
