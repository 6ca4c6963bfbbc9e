use crate::application::models::user::UserRef;
use crate::config::Credentials;
use crate::error::AppError;
use crate::session::session::{DeviceIdentity, IgSession, SessionBundle};

/// Remote capabilities the unfollow core depends on.
///
/// Implementations translate every remote failure into an [`AppError`];
/// `AppError::Unauthorized` is reserved for "session expired or invalid".
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IgApi: Send + Sync {
    async fn login(
        &self,
        credentials: &Credentials,
        device: &DeviceIdentity,
    ) -> Result<IgSession, AppError>;

    async fn restore_session(&self, bundle: &SessionBundle) -> Result<IgSession, AppError>;

    /// Harmless authenticated call used to check that a session is still live.
    async fn probe_liveness(&self, session: &IgSession) -> Result<(), AppError>;

    async fn resolve_account(
        &self,
        session: &IgSession,
        username: &str,
    ) -> Result<UserRef, AppError>;

    /// Returns `true` only when the service confirms the account is no longer followed.
    async fn unfollow(&self, session: &IgSession, user_pk: &str) -> Result<bool, AppError>;

    fn export_bundle(&self, session: &IgSession) -> SessionBundle;
}
