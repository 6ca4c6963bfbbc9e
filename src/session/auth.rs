use crate::config::Credentials;
use crate::error::{AppError, AuthError};
use crate::session::interface::IgApi;
use crate::session::session::{DeviceIdentity, IgSession, SessionBundle};
use crate::storage::session_cache::SessionCache;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

enum AuthState {
    Start,
    TryCachedSession(SessionBundle),
    TryFreshLogin(DeviceIdentity),
    Established(IgSession),
    Failed(AppError),
}

/// Produces a live session, reusing the cached one whenever the remote
/// service still accepts it.
pub struct SessionAuthenticator<A: IgApi + ?Sized> {
    api: Arc<A>,
    credentials: Credentials,
    cache: SessionCache,
}

impl<A: IgApi + ?Sized> SessionAuthenticator<A> {
    pub fn new(api: Arc<A>, credentials: Credentials, cache: SessionCache) -> Self {
        Self {
            api,
            credentials,
            cache,
        }
    }

    /// Runs the cached-session → fresh-login state machine to completion.
    #[instrument(skip(self), fields(username = %self.credentials.username))]
    pub async fn establish_session(&self) -> Result<IgSession, AuthError> {
        let mut state = AuthState::Start;
        loop {
            state = match state {
                AuthState::Start => match self.cache.load() {
                    Ok(Some(bundle)) => AuthState::TryCachedSession(bundle),
                    Ok(None) => AuthState::TryFreshLogin(DeviceIdentity::generate()),
                    Err(e) => {
                        warn!(
                            "Ignoring unreadable session cache {}: {}",
                            self.cache.path().display(),
                            e
                        );
                        AuthState::TryFreshLogin(DeviceIdentity::generate())
                    }
                },
                AuthState::TryCachedSession(bundle) => {
                    match self.login_with_bundle(&bundle).await {
                        Ok(session) => AuthState::Established(session),
                        Err(e) => {
                            info!("Couldn't login user using session information: {}", e);
                            AuthState::TryFreshLogin(bundle.uuids)
                        }
                    }
                }
                AuthState::TryFreshLogin(device) => {
                    match self.login_with_credentials(&device).await {
                        Ok(session) => AuthState::Established(session),
                        Err(e) => {
                            error!("Couldn't login user using username and password: {}", e);
                            AuthState::Failed(e)
                        }
                    }
                }
                AuthState::Established(session) => {
                    info!("Session established for {}", session.username);
                    return Ok(session);
                }
                AuthState::Failed(cause) => return Err(AuthError::Exhausted(cause)),
            };
        }
    }

    async fn login_with_bundle(&self, bundle: &SessionBundle) -> Result<IgSession, AppError> {
        if !bundle
            .username
            .eq_ignore_ascii_case(&self.credentials.username)
        {
            return Err(AppError::InvalidSession(format!(
                "cached session belongs to {}",
                bundle.username
            )));
        }

        let session = self.api.restore_session(bundle).await?;
        match self.api.probe_liveness(&session).await {
            Ok(()) => {
                debug!("Cached session is still valid");
                Ok(session)
            }
            Err(AppError::Unauthorized) => {
                info!("Session is invalid, need to login via username and password");
                // Same device uuids as the cached session.
                let session = self.api.login(&self.credentials, &bundle.uuids).await?;
                self.persist(&session);
                Ok(session)
            }
            Err(e) => Err(e),
        }
    }

    async fn login_with_credentials(&self, device: &DeviceIdentity) -> Result<IgSession, AppError> {
        if self.credentials.username.is_empty() || self.credentials.password.is_empty() {
            return Err(AppError::BadRequest(
                "username and password must be configured".to_string(),
            ));
        }
        info!(
            "Attempting to login via username and password. username: {}",
            self.credentials.username
        );
        let session = self.api.login(&self.credentials, device).await?;
        self.persist(&session);
        Ok(session)
    }

    fn persist(&self, session: &IgSession) {
        let bundle = self.api.export_bundle(session);
        if let Err(e) = self.cache.save(&bundle) {
            warn!(
                "Could not cache session at {}: {}",
                self.cache.path().display(),
                e
            );
        }
    }
}
