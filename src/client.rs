//! HTTP client for Bitrix24 portal REST endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Credentials;
use crate::error::Error;
use crate::response::Response;

/// Request timeout for portal calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single Bitrix24 portal.
///
/// Calls are sent as HTTP POST with JSON parameters to
/// `{base}/{method}.json`. The HTTP outcome is wrapped in a [`Response`]
/// without inspecting the body; envelope decoding and API-level error
/// detection happen in [`Response::data`].
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    /// Creates a client from prepared credentials.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, credentials })
    }

    /// Creates a client from an inbound webhook URL. The common entry point.
    pub fn webhook(url: &str) -> Result<Self, Error> {
        Self::new(Credentials::webhook(url)?)
    }

    /// Calls a REST method with the given parameters and returns the raw
    /// [`Response`] for lazy decoding.
    pub async fn call(&self, method: &str, params: &impl Serialize) -> Result<Response, Error> {
        let url = self.credentials.method_url(method)?;
        tracing::debug!(method, portal = self.credentials.portal(), "calling method");

        let resp = self
            .http
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to call {}: {}", method, e);
                Error::Network(e)
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body for {}: {}", method, e);
            Error::Network(e)
        })?;

        Ok(Response::new(status, body))
    }

    /// Calls a REST method and deserializes the envelope's `result` into `T`.
    pub async fn call_typed<T>(&self, method: &str, params: &impl Serialize) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let response = self.call(method, params).await?;
        let data = response.data()?;
        data.result_as()
    }
}
