use crate::constants::{AUTHORIZATION_HEADER_KEY, MID_HEADER_KEY, USER_AGENT};
use crate::error::AppError;
use crate::session::session_response::ApiErrorBody;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Represents the HTTP client for the Instagram private API.
#[derive(Debug)]
pub struct IgHttpClient {
    client: Client,
    base_url: String,
}

impl IgHttpClient {
    /// Creates a new instance of the IgHttpClient.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API, without trailing path.
    /// * `timeout` - Per-request timeout in seconds.
    ///
    /// # Returns
    ///
    /// A Result containing the IgHttpClient instance or an error.
    pub fn new(base_url: &str, timeout: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self, headers))]
    pub async fn get<T: DeserializeOwned + Debug>(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending GET request to {}", url);

        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send GET request: {:?}", e);
                return Err(AppError::Network(e));
            }
        };

        Self::handle_response(response).await
    }

    /// Sends a form-encoded POST request.
    ///
    /// Returns the body together with the `ig-set-authorization` and
    /// `ig-set-x-mid` response headers, when present.
    #[instrument(skip(self, form, headers))]
    pub async fn post_form<T: DeserializeOwned + Debug>(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
        headers: &[(String, String)],
    ) -> Result<(T, Option<String>, Option<String>), AppError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending POST request to {}", url);

        let mut request = self.client.post(&url).form(form);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send POST request: {:?}", e);
                return Err(AppError::Network(e));
            }
        };

        let authorization = Self::extract_header(&response, AUTHORIZATION_HEADER_KEY);
        let mid = Self::extract_header(&response, MID_HEADER_KEY);

        let body = Self::handle_response(response).await?;
        Ok((body, authorization, mid))
    }

    async fn handle_response<T: DeserializeOwned + Debug>(
        response: Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            Ok(body)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(Self::classify_error(status, &body_text))
        }
    }

    /// Maps a failed response onto the closed set of remote failure kinds.
    pub(crate) fn classify_error(status: StatusCode, body_text: &str) -> AppError {
        let body: ApiErrorBody = serde_json::from_str(body_text).unwrap_or_default();
        let message = body.message.as_str();

        if status == StatusCode::UNAUTHORIZED || message == "login_required" {
            return AppError::Unauthorized;
        }
        if message == "challenge_required" || message == "checkpoint_required" {
            return AppError::ChallengeRequired;
        }
        if status == StatusCode::TOO_MANY_REQUESTS
            || message == "feedback_required"
            || message.contains("Please wait a few minutes")
            || body.spam
        {
            if let Some(title) = &body.feedback_title {
                debug!("Feedback title: {}", title);
            }
            return AppError::RateLimitExceeded;
        }
        if status == StatusCode::NOT_FOUND {
            return AppError::NotFound;
        }
        if status.is_client_error() && !message.is_empty() {
            let detail = match &body.error_type {
                Some(error_type) => format!("{message} ({error_type})"),
                None => message.to_string(),
            };
            return AppError::BadRequest(detail);
        }
        AppError::Unexpected(status)
    }

    fn extract_header(response: &Response, header_name: &str) -> Option<String> {
        match response
            .headers()
            .get(header_name)
            .and_then(|h| h.to_str().ok())
            .map(String::from)
        {
            Some(header_value) => Some(header_value),
            None => {
                debug!("Header {} not found in response", header_name);
                None
            }
        }
    }
}

impl fmt::Display for IgHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"base_url\":\"{}\"}}", self.base_url)
    }
}

#[cfg(test)]
mod tests_ig_http_client {
    use super::*;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create_client(server: &Server) -> IgHttpClient {
        IgHttpClient::new(&server.url(), 5).unwrap()
    }

    #[tokio::test]
    async fn test_get_request_sends_headers() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/test")
            .match_header("X-IG-App-ID", "123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "success"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let headers = vec![("X-IG-App-ID".to_string(), "123".to_string())];
        let result: serde_json::Value = client.get("/test", &headers).await.unwrap();

        assert_eq!(result["message"], "success");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_form_extracts_session_headers() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/test")
            .match_body(Matcher::UrlEncoded("key".into(), "value".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("ig-set-authorization", "Bearer IGT:2:token")
            .with_header("ig-set-x-mid", "mid-1")
            .with_body(r#"{"message": "created"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let (result, authorization, mid) = client
            .post_form::<serde_json::Value>("/test", &[("key", "value".to_string())], &[])
            .await
            .unwrap();

        assert_eq!(result["message"], "created");
        assert_eq!(authorization.as_deref(), Some("Bearer IGT:2:token"));
        assert_eq!(mid.as_deref(), Some("mid-1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_form_without_session_headers() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/test")
            .with_status(200)
            .with_body(r#"{"message": "success"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let (_, authorization, mid) = client
            .post_form::<serde_json::Value>("/test", &[], &[])
            .await
            .unwrap();

        assert!(authorization.is_none());
        assert!(mid.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_required_is_unauthorized() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/feed")
            .with_status(403)
            .with_body(json!({"message": "login_required", "status": "fail"}).to_string())
            .create_async()
            .await;

        let client = create_client(&server);
        let result: Result<serde_json::Value, AppError> = client.get("/feed", &[]).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_json_error() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = create_client(&server);
        let result: Result<serde_json::Value, AppError> = client.get("/test", &[]).await;

        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn test_classify_error() {
        let cases = [
            (StatusCode::UNAUTHORIZED, "", "unauthorized: login required"),
            (
                StatusCode::BAD_REQUEST,
                r#"{"message": "challenge_required"}"#,
                "challenge required",
            ),
            (StatusCode::TOO_MANY_REQUESTS, "", "rate limit exceeded"),
            (
                StatusCode::BAD_REQUEST,
                r#"{"message": "feedback_required", "spam": true, "feedback_title": "Try Again Later"}"#,
                "rate limit exceeded",
            ),
            (
                StatusCode::BAD_REQUEST,
                r#"{"message": "Please wait a few minutes before you try again."}"#,
                "rate limit exceeded",
            ),
            (StatusCode::NOT_FOUND, "Not Found", "not found"),
            (
                StatusCode::BAD_REQUEST,
                r#"{"message": "The password you entered is incorrect.", "error_type": "bad_password"}"#,
                "bad request: The password you entered is incorrect. (bad_password)",
            ),
            (
                StatusCode::BAD_GATEWAY,
                "upstream down",
                "unexpected http status: 502 Bad Gateway",
            ),
        ];

        for (status, body, expected) in cases {
            assert_eq!(IgHttpClient::classify_error(status, body).to_string(), expected);
        }
    }
}
