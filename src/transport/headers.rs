/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 8/9/24
 ******************************************************************************/

use crate::constants::{ACCEPT_LANGUAGE, APP_ID, CAPABILITIES};
use crate::session::session::{DeviceIdentity, IgSession};
use tracing::debug;

/// Per-request headers tying a call to a device and, once logged in, to a session.
#[derive(Debug)]
pub(crate) struct RequestHeaders<'a> {
    device: &'a DeviceIdentity,
    authorization: Option<&'a str>,
    user_id: Option<&'a str>,
    mid: Option<&'a str>,
}

impl<'a> RequestHeaders<'a> {
    /// Headers for calls made before a session exists (login).
    pub(crate) fn anonymous(device: &'a DeviceIdentity) -> Self {
        Self {
            device,
            authorization: None,
            user_id: None,
            mid: None,
        }
    }

    pub(crate) fn for_session(session: &'a IgSession) -> Self {
        Self {
            device: &session.device,
            authorization: Some(session.authorization.as_str()),
            user_id: Some(session.user_id.as_str()),
            mid: session.mid.as_deref(),
        }
    }

    /// Builds the header list sent with a request.
    ///
    /// Every request carries the device identity:
    /// - `X-IG-App-ID`, `X-IG-Capabilities`, `Accept-Language`
    /// - `X-IG-Device-ID` (device uuid) and `X-IG-Android-ID`
    /// - `X-Pigeon-Session-Id` (client session id)
    ///
    /// Authenticated requests add `Authorization`, `IG-U-DS-USER-ID` and, when
    /// the service handed one out, `X-MID`.
    ///
    /// The authorization value is never logged.
    pub(crate) fn to_vec(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("X-IG-App-ID".to_string(), APP_ID.to_string()),
            ("X-IG-Capabilities".to_string(), CAPABILITIES.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
            ("X-IG-Device-ID".to_string(), self.device.uuid.clone()),
            (
                "X-IG-Android-ID".to_string(),
                self.device.android_device_id.clone(),
            ),
            (
                "X-Pigeon-Session-Id".to_string(),
                self.device.client_session_id.clone(),
            ),
        ];
        if let Some(user_id) = self.user_id {
            headers.push(("IG-U-DS-USER-ID".to_string(), user_id.to_string()));
        }
        if let Some(mid) = self.mid {
            headers.push(("X-MID".to_string(), mid.to_string()));
        }
        debug!(
            "Request headers: {:?}",
            headers.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>()
        );
        if let Some(authorization) = self.authorization {
            headers.push(("Authorization".to_string(), authorization.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests_headers {
    use super::*;

    fn header<'h>(headers: &'h [(String, String)], name: &str) -> Option<&'h str> {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_anonymous_headers_have_no_authorization() {
        let device = DeviceIdentity::generate();
        let headers = RequestHeaders::anonymous(&device).to_vec();

        assert_eq!(header(&headers, "X-IG-Device-ID"), Some(device.uuid.as_str()));
        assert_eq!(
            header(&headers, "X-IG-Android-ID"),
            Some(device.android_device_id.as_str())
        );
        assert!(header(&headers, "Authorization").is_none());
        assert!(header(&headers, "IG-U-DS-USER-ID").is_none());
    }

    #[test]
    fn test_session_headers() {
        let session = IgSession {
            username: "user123".to_string(),
            user_id: "42".to_string(),
            authorization: "Bearer IGT:2:abc".to_string(),
            mid: Some("mid-1".to_string()),
            device: DeviceIdentity::generate(),
        };
        let headers = RequestHeaders::for_session(&session).to_vec();

        assert_eq!(header(&headers, "Authorization"), Some("Bearer IGT:2:abc"));
        assert_eq!(header(&headers, "IG-U-DS-USER-ID"), Some("42"));
        assert_eq!(header(&headers, "X-MID"), Some("mid-1"));
    }
}
