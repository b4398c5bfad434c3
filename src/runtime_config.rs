//! # Runtime Configuration Module
//!
//! Environment-driven knobs for the navigation controller.
//!
//! ## Environment Variables
//!
//! ### `NAVGUARD_MAX_REDIRECTS`
//!
//! Maximum number of chained redirects (matcher redirects and guard
//! redirects combined) a single navigation may follow before it settles as a
//! redirect loop. Default: `10`.
//!
//! ### `NAVGUARD_GUARD_TIMEOUT_MS`
//!
//! How long one guard check may take before it resolves to the guard's
//! fallback redirect. Default: `5000`.
//!
//! ```rust
//! use navguard::runtime_config::NavConfig;
//!
//! let config = NavConfig::from_env();
//! assert!(config.max_redirects > 0);
//! ```

use std::env;
use std::time::Duration;

pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_GUARD_TIMEOUT_MS: u64 = 5000;

/// Navigation controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavConfig {
    /// Redirect bound for one navigation attempt
    pub max_redirects: usize,
    /// Upper bound for a single guard check
    pub guard_timeout: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            guard_timeout: Duration::from_millis(DEFAULT_GUARD_TIMEOUT_MS),
        }
    }
}

impl NavConfig {
    /// Load configuration from environment variables, falling back to defaults
    /// for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let max_redirects = env::var("NAVGUARD_MAX_REDIRECTS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_REDIRECTS);
        let guard_timeout_ms = env::var("NAVGUARD_GUARD_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_GUARD_TIMEOUT_MS);
        Self {
            max_redirects,
            guard_timeout: Duration::from_millis(guard_timeout_ms),
        }
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    #[must_use]
    pub fn with_guard_timeout(mut self, timeout: Duration) -> Self {
        self.guard_timeout = timeout;
        self
    }
}
