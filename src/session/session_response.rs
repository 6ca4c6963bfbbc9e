/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 7/9/24
 ******************************************************************************/
use crate::application::models::user::pk_as_string;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub logged_in_user: LoggedInUser,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggedInUser {
    #[serde(deserialize_with = "pk_as_string")]
    pub pk: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

/// Error body the private API returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub spam: bool,
    #[serde(default)]
    pub feedback_title: Option<String>,
}
