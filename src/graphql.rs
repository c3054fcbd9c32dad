use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{AuthError, QueryError};
use crate::session::Session;

pub const GRAPHQL_PATH: &str = "/api/graphql-engine/v1/graphql";

/// Executes catalog queries against the platform's GraphQL endpoint. No
/// schema validation happens here; malformed payloads default at the model
/// layer instead.
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url, GRAPHQL_PATH),
        }
    }

    /// Returns the `data` payload untouched. A populated `errors` array
    /// surfaces only its first message.
    pub async fn execute(
        &self,
        session: &Session,
        query: &str,
        variables: Value,
    ) -> Result<Value, QueryError> {
        if session.token().is_empty() {
            return Err(QueryError::Auth(AuthError::NoToken));
        }

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", session.token().trim()))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        let mut payload: Value = resp.json().await?;
        if let Some(first) = payload
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
        {
            let message = first
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown graphql error")
                .to_string();
            return Err(QueryError::Server(message));
        }

        Ok(payload.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }

    /// Executes and decodes into a model envelope.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        session: &Session,
        query: &str,
        variables: Value,
    ) -> Result<T, QueryError> {
        let data = self.execute(session, query, variables).await?;
        Ok(serde_json::from_value(data)?)
    }
}
