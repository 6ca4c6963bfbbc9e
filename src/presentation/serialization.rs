use crate::error::AppError;
use chrono::Utc;
use serde::Serialize;

pub struct Serializer;

impl Serializer {
    /// Form value of `signed_body` for the private API's mutating endpoints.
    pub fn signed_body<T: Serialize>(payload: &T) -> Result<String, AppError> {
        let json = serde_json::to_string(payload)
            .map_err(|e| AppError::SerializationError(e.to_string()))?;
        Ok(format!("SIGNATURE.{json}"))
    }

    /// Password envelope accepted by the login endpoint (version 0, unencrypted).
    pub fn enc_password(password: &str) -> String {
        Self::enc_password_at(password, Utc::now().timestamp())
    }

    /// Checksum field the login form carries next to the phone id.
    pub fn jazoest(phone_id: &str) -> String {
        let sum: u32 = phone_id.bytes().map(u32::from).sum();
        format!("2{sum}")
    }

    fn enc_password_at(password: &str, timestamp: i64) -> String {
        format!("#PWD_INSTAGRAM:0:{timestamp}:{password}")
    }
}

#[cfg(test)]
mod tests_serializer {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signed_body_prefix() {
        let body = Serializer::signed_body(&json!({"user_id": "42"})).unwrap();
        assert_eq!(body, r#"SIGNATURE.{"user_id":"42"}"#);
    }

    #[test]
    fn test_jazoest() {
        // 'a' + 'b' = 97 + 98
        assert_eq!(Serializer::jazoest("ab"), "2195");
    }

    #[test]
    fn test_enc_password_format() {
        assert_eq!(
            Serializer::enc_password_at("hunter2", 1_700_000_000),
            "#PWD_INSTAGRAM:0:1700000000:hunter2"
        );
        assert!(Serializer::enc_password("x").starts_with("#PWD_INSTAGRAM:0:"));
    }
}
