use crate::error::SessionError;
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// The external session collaborator queried by guards.
///
/// Implementations may hit storage or the network; the guard protocol only
/// reads from them.
#[async_trait]
pub trait Session: Send + Sync {
    /// Id of the registrar the console user is acting for, if any.
    async fn active_registrar(&self) -> Result<Option<String>, SessionError>;
}

/// In-memory session, used by the CLI and tests.
#[derive(Debug, Default)]
pub struct StaticSession {
    registrar: RwLock<Option<String>>,
}

impl StaticSession {
    #[must_use]
    pub fn new(registrar: Option<String>) -> Self {
        Self {
            registrar: RwLock::new(registrar),
        }
    }

    #[must_use]
    pub fn with_registrar(id: impl Into<String>) -> Self {
        Self::new(Some(id.into()))
    }

    /// Switch the active registrar (e.g. after the user picks one).
    pub fn set_registrar(&self, registrar: Option<String>) {
        *self.registrar.write().unwrap_or_else(PoisonError::into_inner) = registrar;
    }
}

#[async_trait]
impl Session for StaticSession {
    async fn active_registrar(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .registrar
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
