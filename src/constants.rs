/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/9/24
******************************************************************************/

pub(crate) const DEFAULT_BASE_URL: &str = "https://i.instagram.com";
pub(crate) const DEFAULT_REST_TIMEOUT: u64 = 30;

pub(crate) const DEFAULT_FOLLOWERS_FILE: &str = "data/followers.json";
pub(crate) const DEFAULT_FOLLOWING_FILE: &str = "data/following.json";
pub(crate) const DEFAULT_PROGRESS_FILE: &str = "data/unfollowed.json";
pub(crate) const DEFAULT_SESSION_FILE: &str = "session.json";
pub(crate) const DEFAULT_LOG_DIR: &str = "logs";
pub(crate) const LOG_FILE_PREFIX: &str = "records";

// 5 to 15 minutes between unfollows
pub(crate) const DEFAULT_PACING_MIN_SECS: u64 = 300;
pub(crate) const DEFAULT_PACING_MAX_SECS: u64 = 900;

pub(crate) const APP_ID: &str = "567067343352427";
pub(crate) const USER_AGENT: &str = "Instagram 269.0.0.18.75 Android (26/8.0.0; 480dpi; 1080x1920; OnePlus; 6T Dev; devitron; qcom; en_US; 314665256)";
pub(crate) const CAPABILITIES: &str = "3brTvx0=";
pub(crate) const ACCEPT_LANGUAGE: &str = "en-US";

pub(crate) const AUTHORIZATION_HEADER_KEY: &str = "ig-set-authorization";
pub(crate) const MID_HEADER_KEY: &str = "ig-set-x-mid";
