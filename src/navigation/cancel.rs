use tokio::sync::watch;

/// Cooperative cancellation for one navigation.
///
/// The navigator publishes the latest generation on a watch channel; a
/// navigation is cancelled as soon as the published generation differs from
/// its own.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    latest: watch::Receiver<u64>,
}

impl CancelToken {
    pub(crate) fn new(generation: u64, latest: watch::Receiver<u64>) -> Self {
        Self { generation, latest }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.latest.borrow() != self.generation
    }

    /// Resolves once a newer navigation has started.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.latest.borrow_and_update() != self.generation {
                return;
            }
            if self.latest.changed().await.is_err() {
                // Navigator dropped: nothing can supersede us any more.
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_token_cancelled_on_newer_generation() {
        let (tx, rx) = watch::channel(1u64);
        let mut token = CancelToken::new(1, rx);
        assert!(!token.is_cancelled());

        tx.send_replace(2);
        assert!(token.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_pending_while_current() {
        let (_tx, rx) = watch::channel(7u64);
        let mut token = CancelToken::new(7, rx);
        let waited = tokio::time::timeout(Duration::from_millis(50), token.cancelled()).await;
        assert!(waited.is_err());
    }
}
