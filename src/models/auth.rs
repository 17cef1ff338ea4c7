use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Response of `/oauth/v2/accessToken`, for both grant types.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    /// Seconds until `access_token` expires.
    #[serde(default)]
    pub expires_in: u64,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_in: Option<u64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub id_token: Option<String>,
}

/// OpenID Connect userinfo of the authenticated member.
///
/// `sub` is the person id used to build `urn:li:person:<sub>`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserInfo {
    pub sub: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub picture: Option<String>,
    pub locale: Option<Value>,

    #[serde(flatten)]
    pub other_fields: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response_minimal() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "AQX",
            "expires_in": 5184000
        }))
        .unwrap();
        assert_eq!(token.access_token, "AQX");
        assert_eq!(token.expires_in, 5_184_000);
        assert!(token.refresh_token.is_none());
    }

    #[test]
    fn test_user_info_keeps_unknown_fields() {
        let info: UserInfo = serde_json::from_value(json!({
            "sub": "abc123",
            "name": "Ada Lovelace",
            "email_verified": true,
            "locale": {"country": "GB", "language": "en"},
            "extra": 1
        }))
        .unwrap();
        assert_eq!(info.sub, "abc123");
        assert_eq!(info.email_verified, Some(true));
        assert_eq!(info.other_fields.get("extra"), Some(&json!(1)));
    }
}
