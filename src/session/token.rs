//! Session token issuance
//!
//! Clients insist on a matchmaking token before browsing, but nothing on
//! this server checks it. The token is the client's own data wrapped in
//! JSON and base64 with a fixed placeholder hash.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder signature, ignored by clients
const TOKEN_HASH: &str = "impostor_http_was_here";

/// Body of a token request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "Puid", default)]
    pub puid: String,
    #[serde(rename = "ClientVersion", default)]
    pub client_version: i32,
}

#[derive(Debug, Serialize)]
struct TokenPayload<'a> {
    #[serde(rename = "Puid")]
    puid: &'a str,
    #[serde(rename = "ClientVersion")]
    client_version: i32,
    #[serde(rename = "ExpiresAt")]
    expires_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
struct Token<'a> {
    #[serde(rename = "Content")]
    content: TokenPayload<'a>,
    #[serde(rename = "Hash")]
    hash: &'static str,
}

/// Fixed expiry stamped on every token; clients do not check it
fn default_expiry() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2012, 12, 21)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Build the base64 token for a request
pub fn issue_token(request: &TokenRequest) -> Result<String, serde_json::Error> {
    let token = Token {
        content: TokenPayload {
            puid: &request.puid,
            client_version: request.client_version,
            expires_at: default_expiry(),
        },
        hash: TOKEN_HASH,
    };

    let serialized = serde_json::to_vec(&token)?;
    Ok(STANDARD.encode(serialized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_layout() {
        let request = TokenRequest {
            puid: "abc123".to_string(),
            client_version: 50_537_300,
        };

        let encoded = issue_token(&request).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            r#"{"Content":{"Puid":"abc123","ClientVersion":50537300,"ExpiresAt":"2012-12-21T00:00:00"},"Hash":"impostor_http_was_here"}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let request: TokenRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.puid, "");
        assert_eq!(request.client_version, 0);
        assert!(issue_token(&request).is_ok());
    }
}
