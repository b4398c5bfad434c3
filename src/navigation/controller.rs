//! The per-request navigation state machine.
//!
//! ```text
//! Matching ──leaf──▶ Guarding ──all allow──▶ Committing ──▶ Settled(Ok)
//!    │  ▲               │
//!    │  └─Redirecting◀──┘ redirect (bounded)
//!    └──redirect──▶ Redirecting ──bound exceeded──▶ Settled(RedirectLoop)
//!    └──not found──▶ Settled(NotFound)
//! ```

use super::cancel::CancelToken;
use super::navigator::Navigator;
use super::CommittedNavigation;
use crate::error::NavigationError;
use crate::guard::{GuardContext, GuardDecision};
use crate::ids::NavigationId;
use crate::location::{self, Location};
use crate::router::{MatchOutcome, ParamVec, ResolvedRoute};
use tracing::{debug, error, info, warn, Instrument};

/// States of one navigation attempt.
#[derive(Debug)]
pub enum NavState {
    Matching(String),
    Guarding(ResolvedRoute),
    Redirecting(String),
    Committing(ResolvedRoute),
    Settled(Result<CommittedNavigation, NavigationError>),
}

impl NavState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NavState::Matching(_) => "matching",
            NavState::Guarding(_) => "guarding",
            NavState::Redirecting(_) => "redirecting",
            NavState::Committing(_) => "committing",
            NavState::Settled(_) => "settled",
        }
    }
}

/// One navigation request. Created by [`Navigator::begin`], consumed by
/// [`Navigation::run`]; never reused.
pub struct Navigation<'n> {
    id: NavigationId,
    navigator: &'n Navigator,
    cancel: CancelToken,
    requested: String,
    query: ParamVec,
    hops: Vec<String>,
}

impl<'n> Navigation<'n> {
    pub(crate) fn new(navigator: &'n Navigator, requested: &str, cancel: CancelToken) -> Self {
        Self {
            id: NavigationId::new(),
            navigator,
            cancel,
            requested: requested.to_string(),
            query: ParamVec::new(),
            hops: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> NavigationId {
        self.id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.cancel.generation()
    }

    /// Drive the state machine until it settles.
    pub async fn run(self) -> Result<CommittedNavigation, NavigationError> {
        let span = tracing::info_span!(
            "navigation",
            id = %self.id,
            generation = self.cancel.generation(),
            requested = %self.requested
        );
        self.drive().instrument(span).await
    }

    async fn drive(mut self) -> Result<CommittedNavigation, NavigationError> {
        let initial = Location::parse(&self.requested);
        self.query = initial.query;
        let mut state = NavState::Matching(initial.path);

        loop {
            debug!(state = state.name(), hops = self.hops.len(), "Navigation state");
            state = match state {
                NavState::Matching(path) => self.matching(&path),
                NavState::Guarding(route) => self.guarding(route).await,
                NavState::Redirecting(target) => self.redirecting(target),
                NavState::Committing(route) => self.committing(route),
                NavState::Settled(result) => {
                    return self.navigator.settle(self.cancel.generation(), &self.requested, result);
                }
            };
        }
    }

    fn matching(&self, path: &str) -> NavState {
        if self.cancel.is_cancelled() {
            return NavState::Settled(Err(NavigationError::Superseded));
        }
        match self.navigator.matcher().resolve(path) {
            Ok(MatchOutcome::Matched(route)) => NavState::Guarding(route),
            Ok(MatchOutcome::Redirect(redirect)) => NavState::Redirecting(redirect.to),
            Err(not_found) => NavState::Settled(Err(NavigationError::NotFound {
                path: not_found.path,
                unmatched: not_found.unmatched,
            })),
        }
    }

    /// Evaluate guards root to leaf; the first redirect wins and nothing
    /// deeper runs.
    async fn guarding(&mut self, route: ResolvedRoute) -> NavState {
        let path = route.path();
        let session = self.navigator.session();
        let timeout = self.navigator.config().guard_timeout;

        for node in route.ancestors() {
            for bound in node.guards() {
                if self.cancel.is_cancelled() {
                    return NavState::Settled(Err(NavigationError::Superseded));
                }
                let ctx = GuardContext {
                    path: &path,
                    route: &route,
                    node,
                    session,
                };
                let check = tokio::time::timeout(timeout, bound.guard.can_enter(&ctx));
                let decision = tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => {
                        debug!(guard = %bound.id, "Guard result discarded: navigation superseded");
                        return NavState::Settled(Err(NavigationError::Superseded));
                    }
                    result = check => match result {
                        Ok(decision) => decision,
                        Err(_) => {
                            warn!(
                                guard = %bound.id,
                                path = %path,
                                timeout_ms = timeout.as_millis(),
                                fallback = %bound.guard.fallback(),
                                "Guard timed out"
                            );
                            GuardDecision::Redirect(bound.guard.fallback().to_string())
                        }
                    },
                };
                if let GuardDecision::Redirect(target) = decision {
                    info!(guard = %bound.id, path = %path, redirect = %target, "Guard redirected navigation");
                    return NavState::Redirecting(target);
                }
                debug!(guard = %bound.id, path = %path, "Guard allowed");
            }
        }
        NavState::Committing(route)
    }

    fn redirecting(&mut self, target: String) -> NavState {
        let target = Location::parse(&target);
        self.hops.push(target.path.clone());
        self.query = target.query;

        let max = self.navigator.config().max_redirects;
        if self.hops.len() > max {
            error!(
                requested = %self.requested,
                hops = ?self.hops,
                max_redirects = max,
                "Redirect loop detected; route declaration is defective"
            );
            return NavState::Settled(Err(NavigationError::RedirectLoop {
                path: location::join(&location::normalize(&self.requested)),
                hops: std::mem::take(&mut self.hops),
            }));
        }
        NavState::Matching(target.path)
    }

    fn committing(&mut self, route: ResolvedRoute) -> NavState {
        let Some(view_id) = route.view_id().cloned() else {
            // The matcher only yields leaves with views.
            return NavState::Settled(Err(NavigationError::NotFound {
                path: route.path(),
                unmatched: String::new(),
            }));
        };
        let path = route.path();
        NavState::Settled(Ok(CommittedNavigation {
            id: self.id,
            requested: self.requested.clone(),
            hash: location::to_hash(&path),
            path,
            view_id,
            params: route.params().clone(),
            query: std::mem::take(&mut self.query),
            redirects: std::mem::take(&mut self.hops),
            breadcrumbs: route.breadcrumbs(),
            route,
        }))
    }
}
