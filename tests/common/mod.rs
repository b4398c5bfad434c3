#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Writes `content` to a temporary file with the given extension.
    ///
    /// The file is removed when the returned handle drops.
    pub fn create_temp_routes(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("navguard_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_routes(content, "json")
    }

    pub fn create_temp_toml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "toml")
    }
}

pub mod sinks {
    use navguard::navigation::{CommittedNavigation, RenderSink};
    use navguard::NavigationError;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Rendered {
        Commit { path: String, view_id: String },
        Reject { requested: String, error: NavigationError },
    }

    /// Records every call the navigator makes into the render layer.
    #[derive(Default)]
    pub struct RecordingSink {
        rendered: Mutex<Vec<Rendered>>,
    }

    impl RecordingSink {
        pub fn rendered(&self) -> Vec<Rendered> {
            self.rendered.lock().clone()
        }

        pub fn committed_paths(&self) -> Vec<String> {
            self.rendered
                .lock()
                .iter()
                .filter_map(|r| match r {
                    Rendered::Commit { path, .. } => Some(path.clone()),
                    Rendered::Reject { .. } => None,
                })
                .collect()
        }
    }

    impl RenderSink for RecordingSink {
        fn commit(&self, navigation: &CommittedNavigation) {
            self.rendered.lock().push(Rendered::Commit {
                path: navigation.path.clone(),
                view_id: navigation.view_id.to_string(),
            });
        }

        fn reject(&self, requested: &str, error: &NavigationError) {
            self.rendered.lock().push(Rendered::Reject {
                requested: requested.to_string(),
                error: error.clone(),
            });
        }
    }
}

pub mod guards {
    use async_trait::async_trait;
    use navguard::guard::{Guard, GuardContext, GuardDecision};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Fixed decision, optionally delayed, counting its calls and logging
    /// its name into a shared call log.
    pub struct ScriptedGuard {
        name: &'static str,
        decision: GuardDecision,
        delay: Duration,
        fallback: String,
        calls: AtomicUsize,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ScriptedGuard {
        pub fn allow(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
            Arc::new(Self::build(name, GuardDecision::Allow, Duration::ZERO, log))
        }

        pub fn redirect(
            name: &'static str,
            target: &str,
            log: &Arc<Mutex<Vec<&'static str>>>,
        ) -> Arc<Self> {
            Arc::new(Self::build(
                name,
                GuardDecision::Redirect(target.to_string()),
                Duration::ZERO,
                log,
            ))
        }

        pub fn slow(name: &'static str, delay: Duration, fallback: &str) -> Arc<Self> {
            let mut guard = Self::build(
                name,
                GuardDecision::Allow,
                delay,
                &Arc::new(Mutex::new(Vec::new())),
            );
            guard.fallback = fallback.to_string();
            Arc::new(guard)
        }

        fn build(
            name: &'static str,
            decision: GuardDecision,
            delay: Duration,
            log: &Arc<Mutex<Vec<&'static str>>>,
        ) -> Self {
            Self {
                name,
                decision,
                delay,
                fallback: "/".to_string(),
                calls: AtomicUsize::new(0),
                log: Arc::clone(log),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Guard for ScriptedGuard {
        async fn can_enter(&self, _ctx: &GuardContext<'_>) -> GuardDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().push(self.name);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.decision.clone()
        }

        fn fallback(&self) -> &str {
            &self.fallback
        }
    }

    /// Allows every path, after a per-path delay.
    pub struct DelayByPathGuard {
        delays: HashMap<String, Duration>,
    }

    impl DelayByPathGuard {
        pub fn new(delays: &[(&str, Duration)]) -> Arc<Self> {
            Arc::new(Self {
                delays: delays
                    .iter()
                    .map(|(path, delay)| ((*path).to_string(), *delay))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl Guard for DelayByPathGuard {
        async fn can_enter(&self, ctx: &GuardContext<'_>) -> GuardDecision {
            if let Some(delay) = self.delays.get(ctx.path) {
                tokio::time::sleep(*delay).await;
            }
            GuardDecision::Allow
        }

        fn fallback(&self) -> &str {
            "/"
        }
    }
}

pub mod sessions {
    use async_trait::async_trait;
    use navguard::guard::Session;
    use navguard::SessionError;

    /// Session whose backend is down.
    pub struct FailingSession;

    #[async_trait]
    impl Session for FailingSession {
        async fn active_registrar(&self) -> Result<Option<String>, SessionError> {
            Err(SessionError::Unavailable("backend unreachable".into()))
        }
    }
}
