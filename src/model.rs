//! Wire-shape data model. Every field the API may omit carries a default so
//! downstream aggregation stays total over partial rows.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: i64,
    pub amount: i64,
    pub created_at: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Transaction {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Text after the last `/`, or the whole path when there is none.
    pub fn path_tail(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub id: i64,
    pub grade: Option<f64>,
    pub created_at: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub id: i64,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub campus: String,
    pub audit_ratio: f64,
    pub total_up: i64,
    pub total_down: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLevel {
    pub user_id: i64,
    pub event_id: i64,
    pub level: i64,
}

// Envelopes for the `data` payload of each catalog query.

#[derive(Debug, Default, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Vec<UserInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionEnvelope {
    #[serde(default)]
    pub transaction: Vec<Transaction>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgressEnvelope {
    #[serde(default)]
    pub progress: Vec<ProgressRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventUserEnvelope {
    #[serde(default)]
    pub event_user: Vec<EventLevel>,
}
