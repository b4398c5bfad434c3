use super::cancel::CancelToken;
use super::controller::Navigation;
use super::{CommittedNavigation, RenderSink};
use crate::error::NavigationError;
use crate::guard::Session;
use crate::router::{PathMatcher, RouteTree};
use crate::runtime_config::NavConfig;
use arc_swap::ArcSwapOption;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Entry point for navigation requests.
///
/// Share it behind an `Arc`; any number of navigations may be in flight, but
/// only the most recently started one can settle into the render sink. Older
/// ones settle as [`NavigationError::Superseded`].
pub struct Navigator {
    matcher: PathMatcher,
    session: Arc<dyn Session>,
    sink: Arc<dyn RenderSink>,
    config: NavConfig,
    latest: watch::Sender<u64>,
    settle_lock: Mutex<()>,
    current: ArcSwapOption<CommittedNavigation>,
}

impl Navigator {
    pub fn new(tree: Arc<RouteTree>, session: Arc<dyn Session>, sink: Arc<dyn RenderSink>) -> Self {
        let (latest, _) = watch::channel(0);
        Self {
            matcher: PathMatcher::new(tree),
            session,
            sink,
            config: NavConfig::default(),
            latest,
            settle_lock: Mutex::new(()),
            current: ArcSwapOption::empty(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[must_use]
    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn tree(&self) -> &Arc<RouteTree> {
        self.matcher.tree()
    }

    pub(crate) fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    /// The last navigation committed to the render sink.
    #[must_use]
    pub fn current(&self) -> Option<Arc<CommittedNavigation>> {
        self.current.load_full()
    }

    /// Start a navigation, superseding every navigation still in flight.
    pub fn begin(&self, path: &str) -> Navigation<'_> {
        let mut generation = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            generation = *latest;
        });
        let cancel = CancelToken::new(generation, self.latest.subscribe());
        let navigation = Navigation::new(self, path, cancel);
        debug!(id = %navigation.id(), generation, requested = %path, "Navigation started");
        navigation
    }

    /// Navigate to `path` and wait until the navigation settles.
    pub async fn navigate(&self, path: &str) -> Result<CommittedNavigation, NavigationError> {
        self.begin(path).run().await
    }

    /// The single point where the render sink is updated.
    pub(crate) fn settle(
        &self,
        generation: u64,
        requested: &str,
        result: Result<CommittedNavigation, NavigationError>,
    ) -> Result<CommittedNavigation, NavigationError> {
        let _settling = self.settle_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = *self.latest.borrow();
        if latest != generation {
            debug!(generation, latest, requested = %requested, "Navigation superseded before settling");
            return Err(NavigationError::Superseded);
        }

        match &result {
            Ok(committed) => {
                info!(
                    requested = %requested,
                    path = %committed.path,
                    view_id = %committed.view_id,
                    redirects = ?committed.redirects,
                    "Navigation committed"
                );
                self.current.store(Some(Arc::new(committed.clone())));
                self.sink.commit(committed);
            }
            Err(NavigationError::Superseded) => {}
            Err(e) => {
                warn!(requested = %requested, error = %e, "Navigation failed");
                self.sink.reject(requested, e);
            }
        }
        result
    }
}
