use crate::error::AppError;
use crate::session::session::SessionBundle;
use crate::storage::utils::{read_if_exists, write_atomic};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Session bundle cache, one file per configured account.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached bundle, `None` when nothing has been cached yet.
    pub fn load(&self) -> Result<Option<SessionBundle>, AppError> {
        match read_if_exists(&self.path)? {
            None => {
                debug!("No cached session at {}", self.path.display());
                Ok(None)
            }
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
        }
    }

    pub fn save(&self, bundle: &SessionBundle) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(bundle)?;
        write_atomic(&self.path, &bytes)?;
        debug!("Session cached at {}", self.path.display());
        Ok(())
    }
}
