use crate::application::models::user::AccountId;
use crate::error::ProgressError;
use crate::storage::utils::{read_if_exists, write_atomic};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable record of the accounts already unfollowed.
pub trait ProgressStore {
    /// Previously recorded identifiers; empty when no record exists yet.
    fn load(&mut self) -> Result<HashSet<AccountId>, ProgressError>;

    /// Appends `id` and returns only once the record is on stable storage.
    fn record_success(&mut self, id: &str) -> Result<(), ProgressError>;
}

/// Progress record kept as a JSON array of usernames.
///
/// Single writer only: two processes sharing one file will lose appends.
#[derive(Debug)]
pub struct JsonProgressStore {
    path: PathBuf,
    entries: Option<Vec<AccountId>>,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<AccountId>, ProgressError> {
        let content = read_if_exists(&self.path).map_err(|source| ProgressError::Io {
            path: self.path.clone(),
            source,
        })?;
        match content {
            None => {
                debug!("No progress record at {}", self.path.display());
                Ok(Vec::new())
            }
            Some(content) => {
                serde_json::from_str(&content).map_err(|source| ProgressError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&mut self) -> Result<HashSet<AccountId>, ProgressError> {
        let entries = self.read_entries()?;
        info!(
            "Loaded {} already unfollowed accounts from {}",
            entries.len(),
            self.path.display()
        );
        let processed = entries.iter().cloned().collect();
        self.entries = Some(entries);
        Ok(processed)
    }

    fn record_success(&mut self, id: &str) -> Result<(), ProgressError> {
        let mut entries = match self.entries.take() {
            Some(entries) => entries,
            None => self.read_entries()?,
        };
        entries.push(id.to_string());

        let serialized = serde_json::to_vec(&entries).map_err(|source| ProgressError::Corrupt {
            path: self.path.clone(),
            source,
        });
        let result = serialized.and_then(|bytes| {
            write_atomic(&self.path, &bytes).map_err(|source| ProgressError::Io {
                path: self.path.clone(),
                source,
            })
        });

        match result {
            Ok(()) => {
                debug!("Recorded {} in {}", id, self.path.display());
                self.entries = Some(entries);
                Ok(())
            }
            Err(e) => {
                // Keep memory in line with what is actually on disk.
                entries.pop();
                self.entries = Some(entries);
                Err(e)
            }
        }
    }
}
