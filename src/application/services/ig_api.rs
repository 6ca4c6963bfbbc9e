use crate::application::models::user::{FriendshipResponse, UserRef, UsernameInfoResponse};
use crate::config::{Credentials, RestApiConfig};
use crate::error::AppError;
use crate::presentation::serialization::Serializer;
use crate::session::interface::IgApi;
use crate::session::session::{DeviceIdentity, IgSession, SessionBundle};
use crate::session::session_response::LoginResponse;
use crate::transport::headers::RequestHeaders;
use crate::transport::http_client::IgHttpClient;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

const LOGIN_ENDPOINT: &str = "/api/v1/accounts/login/";
const TIMELINE_ENDPOINT: &str = "/api/v1/feed/timeline/";

/// [`IgApi`] over the Instagram private mobile API.
pub struct IgHttpApi {
    client: IgHttpClient,
}

impl IgHttpApi {
    pub fn new(config: &RestApiConfig) -> Result<Self, AppError> {
        let client = IgHttpClient::new(&config.base_url, config.timeout)?;
        Ok(Self { client })
    }

    fn signed_form(payload: &serde_json::Value) -> Result<Vec<(&'static str, String)>, AppError> {
        Ok(vec![("signed_body", Serializer::signed_body(payload)?)])
    }
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

#[async_trait]
impl IgApi for IgHttpApi {
    async fn login(
        &self,
        credentials: &Credentials,
        device: &DeviceIdentity,
    ) -> Result<IgSession, AppError> {
        let payload = json!({
            "jazoest": Serializer::jazoest(&device.phone_id),
            "phone_id": device.phone_id,
            "enc_password": Serializer::enc_password(&credentials.password),
            "username": credentials.username,
            "adid": device.advertising_id,
            "guid": device.uuid,
            "device_id": device.android_device_id,
            "google_tokens": "[]",
            "login_attempt_count": "0",
        });
        let form = Self::signed_form(&payload)?;
        let headers = RequestHeaders::anonymous(device).to_vec();

        let (response, authorization, mid): (LoginResponse, _, _) = self
            .client
            .post_form(LOGIN_ENDPOINT, &form, &headers)
            .await?;

        let authorization = authorization
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::InvalidSession("login response carried no authorization".to_string())
            })?;
        info!(
            "Logged in as {} ({})",
            response.logged_in_user.username, response.logged_in_user.pk
        );

        Ok(IgSession {
            username: response.logged_in_user.username,
            user_id: response.logged_in_user.pk,
            authorization,
            mid,
            device: device.clone(),
        })
    }

    async fn restore_session(&self, bundle: &SessionBundle) -> Result<IgSession, AppError> {
        if !bundle.authorization.starts_with("Bearer ") {
            return Err(AppError::InvalidSession(
                "cached bundle has no bearer authorization".to_string(),
            ));
        }
        if bundle.user_id.is_empty() {
            return Err(AppError::InvalidSession(
                "cached bundle has no user id".to_string(),
            ));
        }
        debug!(
            "Restoring session of {} last logged in at {:?}",
            bundle.username, bundle.last_login
        );
        Ok(IgSession {
            username: bundle.username.clone(),
            user_id: bundle.user_id.clone(),
            authorization: bundle.authorization.clone(),
            mid: bundle.mid.clone(),
            device: bundle.uuids.clone(),
        })
    }

    async fn probe_liveness(&self, session: &IgSession) -> Result<(), AppError> {
        let headers = RequestHeaders::for_session(session).to_vec();
        let _: serde_json::Value = self.client.get(TIMELINE_ENDPOINT, &headers).await?;
        Ok(())
    }

    async fn resolve_account(
        &self,
        session: &IgSession,
        username: &str,
    ) -> Result<UserRef, AppError> {
        if !is_valid_username(username) {
            return Err(AppError::BadRequest(format!("invalid username {username:?}")));
        }
        let endpoint = format!("/api/v1/users/{username}/usernameinfo/");
        let headers = RequestHeaders::for_session(session).to_vec();
        let response: UsernameInfoResponse = self.client.get(&endpoint, &headers).await?;
        Ok(response.user)
    }

    async fn unfollow(&self, session: &IgSession, user_pk: &str) -> Result<bool, AppError> {
        let payload = json!({
            "user_id": user_pk,
            "radio_type": "wifi-none",
            "_uid": session.user_id,
            "_uuid": session.device.uuid,
            "device_id": session.device.android_device_id,
        });
        let form = Self::signed_form(&payload)?;
        let endpoint = format!("/api/v1/friendships/destroy/{user_pk}/");
        let headers = RequestHeaders::for_session(session).to_vec();

        let (response, _, _): (FriendshipResponse, _, _) =
            self.client.post_form(&endpoint, &form, &headers).await?;
        Ok(!response.friendship_status.following)
    }

    fn export_bundle(&self, session: &IgSession) -> SessionBundle {
        SessionBundle::from_session(session)
    }
}
