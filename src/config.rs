use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_FOLLOWERS_FILE, DEFAULT_FOLLOWING_FILE, DEFAULT_LOG_DIR,
    DEFAULT_PACING_MAX_SECS, DEFAULT_PACING_MIN_SECS, DEFAULT_PROGRESS_FILE,
    DEFAULT_REST_TIMEOUT, DEFAULT_SESSION_FILE,
};
use crate::storage::config::StorageConfig;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
    pub storage: StorageConfig,
    pub pacing: PacingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

/// Bounds, in seconds, of the random wait between two unfollows.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"username\":\"{}\",\"password\":\"[REDACTED]\"}}",
            self.username
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"storage\":{},\"pacing\":{}}}",
            self.credentials, self.rest_api, self.storage, self.pacing
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for PacingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"min_secs\":{},\"max_secs\":{}}}",
            self.min_secs, self.max_secs
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            credentials: Credentials {
                username: get_env_or_default("IG_USERNAME", String::new()),
                password: get_env_or_default("IG_PASSWORD", String::new()),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default("IG_REST_BASE_URL", String::from(DEFAULT_BASE_URL)),
                timeout: get_env_or_default("IG_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
            },
            storage: StorageConfig {
                followers_file: get_env_or_default(
                    "IG_FOLLOWERS_FILE",
                    PathBuf::from(DEFAULT_FOLLOWERS_FILE),
                ),
                following_file: get_env_or_default(
                    "IG_FOLLOWING_FILE",
                    PathBuf::from(DEFAULT_FOLLOWING_FILE),
                ),
                progress_file: get_env_or_default(
                    "IG_PROGRESS_FILE",
                    PathBuf::from(DEFAULT_PROGRESS_FILE),
                ),
                session_file: get_env_or_default(
                    "IG_SESSION_FILE",
                    PathBuf::from(DEFAULT_SESSION_FILE),
                ),
                log_dir: get_env_or_default("IG_LOG_DIR", PathBuf::from(DEFAULT_LOG_DIR)),
            },
            pacing: PacingConfig {
                min_secs: get_env_or_default("IG_PACING_MIN_SECS", DEFAULT_PACING_MIN_SECS),
                max_secs: get_env_or_default("IG_PACING_MAX_SECS", DEFAULT_PACING_MAX_SECS),
            },
        }
    }
}


#[cfg(test)]
mod tests_display {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn sample_config() -> Config {
        Config {
            credentials: Credentials {
                username: "user123".to_string(),
                password: "pass123".to_string(),
            },
            rest_api: RestApiConfig {
                base_url: "https://api.example.com".to_string(),
                timeout: 30,
            },
            storage: StorageConfig {
                followers_file: PathBuf::from("data/followers.json"),
                following_file: PathBuf::from("data/following.json"),
                progress_file: PathBuf::from("data/unfollowed.json"),
                session_file: PathBuf::from("session.json"),
                log_dir: PathBuf::from("logs"),
            },
            pacing: PacingConfig {
                min_secs: 300,
                max_secs: 900,
            },
        }
    }

    #[test]
    fn test_credentials_display() {
        let credentials = Credentials {
            username: "user123".to_string(),
            password: "pass123".to_string(),
        };

        let display_output = credentials.to_string();
        let expected_json = json!({
            "username": "user123",
            "password": "[REDACTED]"
        });

        assert_json_eq!(
            serde_json::from_str::<serde_json::Value>(&display_output).unwrap(),
            expected_json
        );
    }

    #[test]
    fn test_config_display() {
        let display_output = sample_config().to_string();
        let expected_json = json!({
            "credentials": {
                "username": "user123",
                "password": "[REDACTED]"
            },
            "rest_api": {
                "base_url": "https://api.example.com",
                "timeout": 30
            },
            "storage": {
                "followers_file": "data/followers.json",
                "following_file": "data/following.json",
                "progress_file": "data/unfollowed.json",
                "session_file": "session.json",
                "log_dir": "logs"
            },
            "pacing": {
                "min_secs": 300,
                "max_secs": 900
            }
        });

        assert_json_eq!(
            serde_json::from_str::<serde_json::Value>(&display_output).unwrap(),
            expected_json
        );
        assert!(!display_output.contains("pass123"));
    }
}
