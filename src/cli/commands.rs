use crate::console::console_tree;
use crate::error::ConfigError;
use crate::guard::{GuardRegistry, StaticSession};
use crate::navigation::{Navigator, NullSink};
use crate::router::RouteTree;
use crate::runtime_config::NavConfig;
use crate::spec::{build_tree, load_routes};
use crate::validator::print_issues;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for navguard
///
/// Validates route declarations and resolves paths against them the same way
/// the console does at runtime.
#[derive(Parser, Debug)]
#[command(name = "navguard")]
#[command(about = "Console route tree tooling", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a route declaration
    Check {
        /// Route declaration (YAML, JSON or TOML); the built-in console routes when omitted
        #[arg(short, long)]
        routes: Option<PathBuf>,
    },
    /// Print every route of the tree
    Routes {
        #[arg(short, long)]
        routes: Option<PathBuf>,
    },
    /// Run a navigation and print its outcome as JSON
    Resolve {
        /// Requested path or fragment, e.g. `#/settings`
        #[arg(short, long)]
        path: String,

        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Active registrar id; no registrar when omitted
        #[arg(long)]
        registrar: Option<String>,

        /// Override NAVGUARD_MAX_REDIRECTS
        #[arg(long)]
        max_redirects: Option<usize>,
    },
}

/// Run the selected command.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { routes } => {
            let tree = load_tree(routes.as_deref())?;
            println!("✅ route declaration is valid ({} routes)", tree.entries().len());
            Ok(())
        }
        Commands::Routes { routes } => {
            load_tree(routes.as_deref())?.dump_routes();
            Ok(())
        }
        Commands::Resolve {
            path,
            routes,
            registrar,
            max_redirects,
        } => {
            let tree = load_tree(routes.as_deref())?;
            let mut config = NavConfig::from_env();
            if let Some(max) = max_redirects {
                config = config.with_max_redirects(max);
            }
            let report = resolve_report(tree, config, registrar, &path)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// Build the tree from `routes`, or the console tree when `None`.
///
/// Validation issues are printed to stderr before the error is returned.
pub fn load_tree(routes: Option<&Path>) -> anyhow::Result<Arc<RouteTree>> {
    let built = match routes {
        Some(path) => {
            let decls = load_routes(path)?;
            build_tree(&decls, &GuardRegistry::console())
        }
        None => console_tree(),
    };
    built
        .inspect_err(|err: &ConfigError| print_issues(err.issues()))
        .context("route tree construction failed")
}

/// Navigate once with a static session and describe the outcome.
pub fn resolve_report(
    tree: Arc<RouteTree>,
    config: NavConfig,
    registrar: Option<String>,
    path: &str,
) -> anyhow::Result<Value> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start navigation runtime")?;

    let navigator = Navigator::new(
        tree,
        Arc::new(StaticSession::new(registrar)),
        Arc::new(NullSink),
    )
    .with_config(config);

    let report = match runtime.block_on(navigator.navigate(path)) {
        Ok(committed) => json!({ "outcome": "committed", "navigation": committed }),
        Err(error) => json!({ "outcome": "failed", "error": error }),
    };
    Ok(report)
}
