//! # Location Module
//!
//! The console addresses views through the URL fragment (`#/settings/contact`)
//! so that navigation never triggers a document round trip. The routing core
//! only ever sees plain paths; this module converts between the two and
//! normalises paths into segments.
//!
//! ```rust
//! use navguard::location::{Location, to_hash};
//!
//! let loc = Location::parse("#/tlds?sort=asc");
//! assert_eq!(loc.path, "/tlds");
//! assert_eq!(loc.query_param("sort"), Some("asc"));
//! assert_eq!(to_hash("/tlds"), "#/tlds");
//! ```

use crate::router::ParamVec;
use serde::Serialize;
use std::sync::Arc;

/// A parsed address: canonical path plus decoded query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Canonical path, always starting with `/`, segments percent-encoded
    pub path: String,
    pub query: ParamVec,
}

impl Location {
    /// Parse a fragment (`#/a/b?x=1`), a bare path (`/a/b`) or a relative
    /// path (`a/b`). Never fails; garbage is normalised.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let (path, query) = match raw.split_once('?') {
            Some((p, q)) => (p, q),
            None => (raw, ""),
        };
        Self {
            path: join(&normalize(path)),
            query: parse_query(query),
        }
    }

    /// Query parameter by name, last write wins.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Split a path into decoded, non-empty segments.
///
/// Strips a leading `#`, any query string and any trailing slash. Segments
/// that fail percent-decoding are kept verbatim.
#[must_use]
pub fn normalize(path: &str) -> Vec<String> {
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.split('?').next().unwrap_or_default();
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .collect()
}

/// Join decoded segments back into a canonical absolute path.
///
/// Each segment is percent-encoded, so `normalize(&join(segs)) == segs` and a
/// segment holding `/`, `?` or `%` survives the trip through an address.
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::with_capacity(segments.iter().map(|s| s.as_ref().len() + 1).sum());
    for segment in segments {
        out.push('/');
        out.push_str(&urlencoding::encode(segment.as_ref()));
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Render a path as a fragment suitable for the address bar.
#[must_use]
pub fn to_hash(path: &str) -> String {
    format!("#{}", join(&normalize(path)))
}

fn parse_query(query: &str) -> ParamVec {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let k = urlencoding::decode(k).map(|d| d.into_owned()).unwrap_or_else(|_| k.to_string());
            let v = urlencoding::decode(v).map(|d| d.into_owned()).unwrap_or_else(|_| v.to_string());
            (Arc::from(k.as_str()), v)
        })
        .collect()
}
