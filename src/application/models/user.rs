use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Account identifier as it appears in the exports: the username.
pub type AccountId = String;

/// Remote reference an account identifier resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(deserialize_with = "pk_as_string")]
    pub pk: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_private: bool,
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"pk\":\"{}\",\"username\":\"{}\",\"full_name\":{},\"is_private\":{}}}",
            self.pk,
            self.username,
            serde_json::Value::String(self.full_name.clone()),
            self.is_private
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameInfoResponse {
    pub user: UserRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FriendshipStatus {
    pub following: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FriendshipResponse {
    pub friendship_status: FriendshipStatus,
}

// The API sends pks as numbers on some endpoints and strings on others.
pub(crate) fn pk_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected pk as string or number, got {other}"
        ))),
    }
}
