//! # CLI Module
//!
//! Command-line tooling around the route declaration: validate it, list the
//! resulting tree, and run a single navigation against it.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Build the tree and report every validation issue:
//!
//! ```bash
//! navguard check --routes routes.yaml
//! ```
//!
//! ### `routes`
//!
//! Print each route with its view, redirect and guards:
//!
//! ```bash
//! navguard routes
//! ```
//!
//! ### `resolve`
//!
//! Navigate once and print the committed navigation (or the failure) as JSON:
//!
//! ```bash
//! navguard resolve --path '#/settings' --registrar TheRegistrar
//! ```
//!
//! `--routes` is optional everywhere; without it the built-in console routes
//! are used.

mod commands;


pub use commands::{load_tree, resolve_report, run_cli, Cli, Commands};
