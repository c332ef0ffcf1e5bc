//! Lazy decoding of the Bitrix24 response envelope.

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::error::{ApiError, Error};
use crate::types::{ResponseData, Time};

/// A raw response from the portal, decoded on demand.
///
/// The body is kept as received; [`Response::data`] parses the envelope the
/// first time it is called and caches the result, so repeated access does
/// not re-parse. API-level errors (`error`/`error_description` fields) are
/// detected during decoding and surfaced as [`Error::Api`] even when the
/// portal answered with HTTP 200.
pub struct Response {
    status: u16,
    body: String,
    data: OnceCell<ResponseData>,
}

/// The envelope as it comes off the wire. Every field is optional so a
/// single deserialization pass covers both success and error shapes.
#[derive(Deserialize)]
struct RawEnvelope {
    error: Option<String>,
    error_description: Option<String>,
    result: Option<serde_json::Value>,
    time: Option<Time>,
    total: Option<u64>,
    next: Option<u64>,
}

impl Response {
    /// Wraps an HTTP status and body. Usually obtained from
    /// [`Client::call`](crate::Client::call).
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            data: OnceCell::new(),
        }
    }

    /// The HTTP status code of the underlying response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw body, untouched.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the envelope, caching the result on first success.
    ///
    /// Decoding order matters: an error envelope wins over the HTTP status,
    /// because the portal reports some API errors with 4xx statuses and a
    /// perfectly good JSON body. A non-success status with no envelope at
    /// all becomes [`Error::HttpStatus`].
    pub fn data(&self) -> Result<&ResponseData, Error> {
        self.data.get_or_try_init(|| self.decode())
    }

    fn decode(&self) -> Result<ResponseData, Error> {
        tracing::debug!(status = self.status, "decoding response envelope");

        let envelope = match serde_json::from_str::<RawEnvelope>(&self.body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let snippet = truncate_body(&self.body);
                tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
                if !self.is_success() {
                    return Err(Error::HttpStatus {
                        status: self.status,
                        body: snippet,
                    });
                }
                return Err(Error::ParseFailed(format!(
                    "invalid envelope: {} | body: {}",
                    e, snippet
                )));
            }
        };

        if let Some(code) = envelope.error {
            let err = ApiError::from_envelope(&code, envelope.error_description.as_deref());
            tracing::error!("API error: {} | body: {}", err, truncate_body(&self.body));
            return Err(Error::Api(err));
        }

        if !self.is_success() {
            let snippet = truncate_body(&self.body);
            tracing::error!("Request failed with status {}: {}", self.status, snippet);
            return Err(Error::HttpStatus {
                status: self.status,
                body: snippet,
            });
        }

        let (result, time) = match (envelope.result, envelope.time) {
            (Some(result), Some(time)) => (result, time),
            _ => {
                let snippet = truncate_body(&self.body);
                tracing::error!("Envelope missing result or time | body: {}", snippet);
                return Err(Error::ParseFailed(format!(
                    "envelope missing `result` or `time` | body: {}",
                    snippet
                )));
            }
        };

        tracing::debug!("response envelope decoded");
        Ok(ResponseData {
            result,
            time,
            total: envelope.total,
            next: envelope.next,
        })
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // MAX may land inside a multi-byte character; back up to a boundary.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
