/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 12/5/25
 ******************************************************************************/
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::{fmt, io};
use reqwest::StatusCode;

/// Failure kinds of the remote API, as translated by the HTTP adapter.
#[derive(Debug)]
pub enum AppError {
    Network(reqwest::Error),
    Io(io::Error),
    Json(serde_json::Error),
    Unexpected(StatusCode),
    /// The remote service no longer accepts the session (`login_required`).
    Unauthorized,
    ChallengeRequired,
    NotFound,
    RateLimitExceeded,
    BadRequest(String),
    InvalidSession(String),
    SerializationError(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e)   => write!(f, "network error: {e}"),
            AppError::Io(e)        => write!(f, "io error: {e}"),
            AppError::Json(e)      => write!(f, "json error: {e}"),
            AppError::Unexpected(s)=> write!(f, "unexpected http status: {s}"),
            AppError::Unauthorized  => write!(f, "unauthorized: login required"),
            AppError::ChallengeRequired => write!(f, "challenge required"),
            AppError::NotFound      => write!(f, "not found"),
            AppError::RateLimitExceeded => write!(f, "rate limit exceeded"),
            AppError::BadRequest(s) => write!(f, "bad request: {s}"),
            AppError::InvalidSession(s) => write!(f, "invalid session: {s}"),
            AppError::SerializationError(s) => write!(f, "serialization error: {s}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self { AppError::Network(e) }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self { AppError::Io(e) }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self { AppError::Json(e) }
}

#[derive(Debug)]
pub enum AuthError {
    /// Both the cached session and the fresh login failed; carries the last cause.
    Exhausted(AppError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Exhausted(cause) => write!(
                f,
                "couldn't login user with either session or password: {cause}"
            ),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Exhausted(cause) => Some(cause),
        }
    }
}

#[derive(Debug)]
pub enum SnapshotError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    /// An export record carries no account identifier.
    Malformed { path: PathBuf, index: usize, reason: String },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, source } => {
                write!(f, "cannot read snapshot {}: {source}", path.display())
            }
            SnapshotError::Json { path, source } => {
                write!(f, "snapshot {} is not valid json: {source}", path.display())
            }
            SnapshotError::Malformed { path, index, reason } => write!(
                f,
                "malformed snapshot {} at entry {index}: {reason}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[derive(Debug)]
pub enum ProgressError {
    Io { path: PathBuf, source: io::Error },
    /// The record exists but cannot be parsed. It is never reset.
    Corrupt { path: PathBuf, source: serde_json::Error },
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::Io { path, source } => {
                write!(f, "progress record {} io error: {source}", path.display())
            }
            ProgressError::Corrupt { path, source } => write!(
                f,
                "progress record {} is corrupt, refusing to continue: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ProgressError {}

/// Per-candidate failures. Logged and counted, never fatal.
#[derive(Debug)]
pub enum CandidateError {
    UserLookup { username: String, source: AppError },
    Unfollow { username: String, source: AppError },
    Rejected { username: String },
}

impl Display for CandidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CandidateError::UserLookup { username, source } => {
                write!(f, "cannot resolve {username}: {source}")
            }
            CandidateError::Unfollow { username, source } => {
                write!(f, "error unfollowing {username}: {source}")
            }
            CandidateError::Rejected { username } => {
                write!(f, "unfollow of {username} was not confirmed")
            }
        }
    }
}

impl std::error::Error for CandidateError {}

/// Session-level failures that abort a run.
#[derive(Debug)]
pub enum SessionError {
    Auth(AuthError),
    Snapshot(SnapshotError),
    Progress(ProgressError),
    Transport(AppError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Auth(e) => write!(f, "authentication failed: {e}"),
            SessionError::Snapshot(e) => write!(f, "{e}"),
            SessionError::Progress(e) => write!(f, "{e}"),
            SessionError::Transport(e) => write!(f, "cannot build api client: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<AuthError> for SessionError {
    fn from(e: AuthError) -> Self { SessionError::Auth(e) }
}
impl From<SnapshotError> for SessionError {
    fn from(e: SnapshotError) -> Self { SessionError::Snapshot(e) }
}
impl From<ProgressError> for SessionError {
    fn from(e: ProgressError) -> Self { SessionError::Progress(e) }
}
impl From<AppError> for SessionError {
    fn from(e: AppError) -> Self { SessionError::Transport(e) }
}

#[cfg(test)]
mod tests_error {
    use super::*;

    #[test]
    fn test_exhausted_auth_error_keeps_its_cause() {
        use std::error::Error;

        let err = AuthError::Exhausted(AppError::ChallengeRequired);
        assert_eq!(
            err.to_string(),
            "couldn't login user with either session or password: challenge required"
        );
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("challenge required"));
    }

    #[test]
    fn test_candidate_error_display() {
        let err = CandidateError::UserLookup {
            username: "alice".to_string(),
            source: AppError::NotFound,
        };
        assert_eq!(err.to_string(), "cannot resolve alice: not found");

        let err = CandidateError::Rejected {
            username: "bob".to_string(),
        };
        assert_eq!(err.to_string(), "unfollow of bob was not confirmed");
    }

    #[test]
    fn test_malformed_snapshot_display() {
        let err = SnapshotError::Malformed {
            path: PathBuf::from("data/following.json"),
            index: 3,
            reason: "no identifier".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed snapshot data/following.json at entry 3: no identifier"
        );
    }
}
