use super::types::{DeclFormat, RouteDecl, RouteFile};
use anyhow::Context;
use std::path::Path;

/// Load a route declaration from a YAML, JSON or TOML file.
///
/// YAML and JSON files hold a bare list of entries; TOML files hold
/// `[[routes]]` tables.
pub fn load_routes(file_path: impl AsRef<Path>) -> anyhow::Result<Vec<RouteDecl>> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read route declaration {}", file_path.display()))?;
    load_routes_from_str(&content, DeclFormat::from_path(file_path))
        .with_context(|| format!("failed to parse route declaration {}", file_path.display()))
}

/// Parse a route declaration held in memory.
pub fn load_routes_from_str(content: &str, format: DeclFormat) -> anyhow::Result<Vec<RouteDecl>> {
    let routes = match format {
        DeclFormat::Yaml => serde_yaml::from_str(content)?,
        DeclFormat::Json => serde_json::from_str(content)?,
        DeclFormat::Toml => toml::from_str::<RouteFile>(content)?.routes,
    };
    Ok(routes)
}
