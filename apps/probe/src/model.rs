//! Payload and identifier types exchanged with the backend

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::PayloadConfig;

/// Flat user record sent as the JSON body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub firstname: String,
    pub surname: String,
    pub mobile_number: String,
}

impl UserRecord {
    /// Fresh record built from the configured payload fields.
    pub fn from_config(payload: &PayloadConfig) -> Self {
        Self {
            username: payload.username.clone(),
            firstname: payload.firstname.clone(),
            surname: payload.surname.clone(),
            mobile_number: payload.mobile_number.clone(),
        }
    }

    /// Fresh record with `username` and `firstname` replaced by the configured
    /// update values.
    pub fn updated_from_config(payload: &PayloadConfig) -> Self {
        Self {
            username: payload.updated_username.clone(),
            firstname: payload.updated_firstname.clone(),
            ..Self::from_config(payload)
        }
    }
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::from_config(&PayloadConfig::default())
    }
}

/// Backend-assigned identifier of a created record. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Pull `_id` out of a creation response body.
    ///
    /// Missing, non-string, and empty values all yield `None`.
    pub fn from_body(body: &Value) -> Option<Self> {
        body.get("_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
