use crate::application::models::snapshot::SnapshotKind;
use crate::application::services::differ::{compute_unfollow_candidates, load_snapshot};
use crate::application::services::ig_api::IgHttpApi;
use crate::application::services::pacing::RandomPacing;
use crate::application::services::unfollow_service::{SessionReport, UnfollowController};
use crate::config::Config;
use crate::error::SessionError;
use crate::session::auth::SessionAuthenticator;
use crate::session::interface::IgApi;
use crate::storage::progress::{JsonProgressStore, ProgressStore};
use crate::storage::session_cache::SessionCache;
use std::sync::Arc;
use tracing::info;

/// One full unfollow session against the live service.
pub async fn run(config: &Config) -> Result<SessionReport, SessionError> {
    let api = Arc::new(IgHttpApi::new(&config.rest_api)?);
    run_with_api(api, config).await
}

/// Authenticates, diffs the snapshots and unfollows whatever is still pending.
///
/// Every failure that ends the session before the first unfollow is raised
/// before any remote mutation takes place.
pub async fn run_with_api<A: IgApi + ?Sized>(
    api: Arc<A>,
    config: &Config,
) -> Result<SessionReport, SessionError> {
    let storage = &config.storage;

    let authenticator = SessionAuthenticator::new(
        api.clone(),
        config.credentials.clone(),
        SessionCache::new(&storage.session_file),
    );
    let session = authenticator.establish_session().await?;

    let following = load_snapshot(&storage.following_file, SnapshotKind::Following)?;
    let followers = load_snapshot(&storage.followers_file, SnapshotKind::Followers)?;
    let candidates = compute_unfollow_candidates(&following, &followers);
    info!(
        "{} accounts followed, {} followers, {} don't follow back",
        following.len(),
        followers.len(),
        candidates.len()
    );

    let mut store = JsonProgressStore::new(&storage.progress_file);
    let already_processed = store.load()?;

    let mut controller = UnfollowController::new(api, store, RandomPacing::from(config.pacing));
    let report = controller
        .run_session(&session, &candidates, &already_processed)
        .await?;
    Ok(report)
}
