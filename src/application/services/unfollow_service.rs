use crate::application::models::user::{AccountId, UserRef};
use crate::application::services::pacing::PacingPolicy;
use crate::error::{CandidateError, ProgressError};
use crate::session::interface::IgApi;
use crate::session::session::IgSession;
use crate::storage::progress::ProgressStore;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one unfollow session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Every account unfollowed so far, previous runs included.
    pub processed: HashSet<AccountId>,
    /// Accounts unfollowed by this run, in order.
    pub unfollowed: Vec<AccountId>,
    pub failures: Vec<(AccountId, String)>,
}

impl SessionReport {
    fn new(already_processed: &HashSet<AccountId>) -> Self {
        Self {
            processed: already_processed.clone(),
            ..Self::default()
        }
    }

    fn record_success(&mut self, id: &str) {
        self.succeeded += 1;
        self.processed.insert(id.to_string());
        self.unfollowed.push(id.to_string());
    }

    fn record_failure(&mut self, id: &str, error: &CandidateError) {
        self.failed += 1;
        self.failures.push((id.to_string(), error.to_string()));
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"attempted\":{},\"succeeded\":{},\"failed\":{},\"processed\":{}}}",
            self.attempted,
            self.succeeded,
            self.failed,
            self.processed.len()
        )
    }
}

/// Distinct candidates still to unfollow, in order, and how many distinct
/// candidates were already unfollowed.
fn split_pending<'a>(
    candidates: &'a [AccountId],
    already_processed: &HashSet<AccountId>,
) -> (Vec<&'a AccountId>, usize) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pending = Vec::new();
    let mut already_unfollowed = 0;
    for id in candidates {
        if !seen.insert(id.as_str()) {
            continue;
        }
        if already_processed.contains(id) {
            already_unfollowed += 1;
        } else {
            pending.push(id);
        }
    }
    (pending, already_unfollowed)
}

/// Drives the remote unfollows one candidate at a time.
pub struct UnfollowController<A: IgApi + ?Sized, P: ProgressStore, S: PacingPolicy> {
    api: Arc<A>,
    store: P,
    pacing: S,
}

impl<A: IgApi + ?Sized, P: ProgressStore, S: PacingPolicy> UnfollowController<A, P, S> {
    pub fn new(api: Arc<A>, store: P, pacing: S) -> Self {
        Self { api, store, pacing }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Unfollows every candidate not in `already_processed`, strictly in
    /// sequence, pacing between consecutive attempts.
    ///
    /// Per-candidate failures are logged and counted. Only a failure to
    /// persist progress aborts the session.
    pub async fn run_session(
        &mut self,
        session: &IgSession,
        candidates: &[AccountId],
        already_processed: &HashSet<AccountId>,
    ) -> Result<SessionReport, ProgressError> {
        let (pending, already_unfollowed) = split_pending(candidates, already_processed);
        info!(
            "{} candidates, {} already unfollowed, {} pending",
            candidates.len(),
            already_unfollowed,
            pending.len()
        );

        let mut report = SessionReport::new(already_processed);
        let total = pending.len();

        for (iteration, username) in pending.into_iter().enumerate() {
            report.attempted += 1;
            match self.unfollow_candidate(session, username).await {
                Ok(user) => {
                    self.store.record_success(username)?;
                    info!("Successfully unfollowed {} ({})", username, user.pk);
                    report.record_success(username);
                }
                Err(e) => {
                    warn!("{}", e);
                    report.record_failure(username, &e);
                }
            }

            if iteration + 1 < total {
                let delay = self.pacing.delay(iteration);
                if !delay.is_zero() {
                    info!("Time until next unfollow: {} seconds", delay.as_secs());
                    tokio::time::sleep(delay).await;
                }
            }
        }

        info!("Unfollow session finished: {}", report);
        Ok(report)
    }

    async fn unfollow_candidate(
        &self,
        session: &IgSession,
        username: &str,
    ) -> Result<UserRef, CandidateError> {
        let user = self
            .api
            .resolve_account(session, username)
            .await
            .map_err(|source| CandidateError::UserLookup {
                username: username.to_string(),
                source,
            })?;
        debug!("Resolved {}: {}", username, user);

        let confirmed = self
            .api
            .unfollow(session, &user.pk)
            .await
            .map_err(|source| CandidateError::Unfollow {
                username: username.to_string(),
                source,
            })?;
        if !confirmed {
            return Err(CandidateError::Rejected {
                username: username.to_string(),
            });
        }
        Ok(user)
    }
}
