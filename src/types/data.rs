use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Time;

/// The decoded payload of a successful envelope.
///
/// `result` stays untyped because its shape depends entirely on the REST
/// method called; use [`ResponseData::result_as`] to project it into a
/// concrete type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseData {
    pub result: serde_json::Value,
    pub time: Time,
    /// Total number of items, sent by list methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Offset of the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
}

impl ResponseData {
    /// Deserializes the `result` field into `T`.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(self.result.clone())
            .map_err(|e| Error::ParseFailed(format!("Failed to deserialize result: {}", e)))
    }

    /// Whether a list method has further pages to fetch.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}
