/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/9/24
******************************************************************************/
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifiers a mobile client presents on every request.
///
/// Generated once, then carried in the session bundle and reused on every
/// later login of the same account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub phone_id: String,
    pub uuid: String,
    pub client_session_id: String,
    pub advertising_id: String,
    pub android_device_id: String,
}

impl DeviceIdentity {
    pub fn generate() -> Self {
        let android_id: u64 = rand::thread_rng().gen();
        Self {
            phone_id: Uuid::new_v4().to_string(),
            uuid: Uuid::new_v4().to_string(),
            client_session_id: Uuid::new_v4().to_string(),
            advertising_id: Uuid::new_v4().to_string(),
            android_device_id: format!("android-{android_id:016x}"),
        }
    }
}

/// Authenticated handle lent to the unfollow controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgSession {
    pub username: String,
    pub user_id: String,
    pub authorization: String,
    pub mid: Option<String>,
    pub device: DeviceIdentity,
}

/// Serialized session state written to the session cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBundle {
    pub username: String,
    pub user_id: String,
    pub authorization: String,
    #[serde(default)]
    pub mid: Option<String>,
    pub uuids: DeviceIdentity,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl SessionBundle {
    pub fn from_session(session: &IgSession) -> Self {
        Self {
            username: session.username.clone(),
            user_id: session.user_id.clone(),
            authorization: session.authorization.clone(),
            mid: session.mid.clone(),
            uuids: session.device.clone(),
            last_login: Some(Utc::now()),
        }
    }
}

impl fmt::Display for IgSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"username\":\"{}\",\"user_id\":\"{}\",\"authorization\":\"[REDACTED]\",\"mid\":{},\"device_id\":\"{}\"}}",
            self.username,
            self.user_id,
            self.mid.as_ref().map_or("null".to_string(), |_| "\"[REDACTED]\"".to_string()),
            self.device.android_device_id
        )
    }
}
