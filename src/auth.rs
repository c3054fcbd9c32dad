use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::Value;

use crate::error::AuthError;

pub const SIGNIN_PATH: &str = "/api/auth/signin";

const TOKEN_FIELDS: [&str; 4] = ["token", "access_token", "jwt", "auth_token"];

/// Exchanges credentials for a bearer token. The request carries no body;
/// everything rides in the Basic authorization header.
pub async fn signin(
    http: &Client,
    base_url: &str,
    identifier: &str,
    password: &str,
) -> Result<String, AuthError> {
    let credential = STANDARD.encode(format!("{}:{}", identifier, password));
    let resp = http
        .post(format!("{}{}", base_url, SIGNIN_PATH))
        .header("Authorization", format!("Basic {}", credential))
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }
    extract_token(&body)
}

/// Deployments disagree on the signin response shape: some return a JSON
/// object with the token under one of several field names, some return the
/// bare token string, optionally quoted.
fn extract_token(body: &str) -> Result<String, AuthError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            for field in TOKEN_FIELDS {
                if let Some(token) = map.get(field).and_then(Value::as_str) {
                    return Ok(token.to_string());
                }
            }
            Err(AuthError::MissingToken)
        }
        Ok(Value::String(token)) => {
            if token.contains('.') {
                Ok(token)
            } else {
                Err(AuthError::MalformedToken(token))
            }
        }
        _ => {
            let raw = body.trim().trim_matches('"').to_string();
            if raw.contains('.') {
                Ok(raw)
            } else {
                Err(AuthError::MalformedToken(raw))
            }
        }
    }
}
