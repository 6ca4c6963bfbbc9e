use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Locations of every file a session reads or writes.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub followers_file: PathBuf,
    pub following_file: PathBuf,
    pub progress_file: PathBuf,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
}

impl fmt::Display for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"followers_file\":\"{}\",\"following_file\":\"{}\",\"progress_file\":\"{}\",\"session_file\":\"{}\",\"log_dir\":\"{}\"}}",
            self.followers_file.display(),
            self.following_file.display(),
            self.progress_file.display(),
            self.session_file.display(),
            self.log_dir.display()
        )
    }
}
