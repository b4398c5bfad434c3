use super::{Guard, GuardContext, GuardDecision};
use async_trait::async_trait;
use tracing::{info, warn};

/// Path of the registrar picker.
pub const REGISTRAR_SELECTION_PATH: &str = "/registrars";

/// Allows entry only while a registrar is active in the session.
///
/// Without one the user is sent to the registrar picker. Session errors are
/// treated the same way.
#[derive(Debug, Clone)]
pub struct RegistrarGuard {
    redirect: String,
}

impl RegistrarGuard {
    pub fn new(redirect: impl Into<String>) -> Self {
        Self {
            redirect: redirect.into(),
        }
    }
}

impl Default for RegistrarGuard {
    fn default() -> Self {
        Self::new(REGISTRAR_SELECTION_PATH)
    }
}

#[async_trait]
impl Guard for RegistrarGuard {
    async fn can_enter(&self, ctx: &GuardContext<'_>) -> GuardDecision {
        match ctx.session.active_registrar().await {
            Ok(Some(registrar)) if !registrar.is_empty() => GuardDecision::Allow,
            Ok(_) => {
                info!(path = %ctx.path, redirect = %self.redirect, "No active registrar");
                GuardDecision::Redirect(self.redirect.clone())
            }
            Err(e) => {
                warn!(path = %ctx.path, error = %e, redirect = %self.redirect, "Session check failed");
                GuardDecision::Redirect(self.redirect.clone())
            }
        }
    }

    fn fallback(&self) -> &str {
        &self.redirect
    }
}
