//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur when calling a Bitrix24 portal.
#[derive(Error, Debug)]
pub enum Error {
    /// The portal answered with an API-level error envelope.
    #[error("{0}")]
    Api(#[from] ApiError),
    /// The portal returned a non-success status without an error envelope.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a valid Bitrix24 envelope.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// A webhook or portal URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Network error
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}

/// An error reported inside the response envelope, e.g.
/// `{"error": "EXPIRED_TOKEN", "error_description": "..."}`.
///
/// The original `error` code is kept verbatim; [`ApiErrorKind`] is the
/// classified form callers match on.
#[derive(Error, Debug)]
#[error("{code} - {description}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// The `error` field as sent by the portal.
    pub code: String,
    /// The `error_description` field, empty when the portal omits it.
    pub description: String,
}

/// Classification of the portal's `error` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiErrorKind {
    /// `EXPIRED_TOKEN`: the access token has expired and must be refreshed.
    ExpiredToken,
    /// `INVALID_TOKEN` or `INVALID_GRANT`: the token or grant is not valid.
    InvalidToken,
    /// `WRONG_CLIENT` or `ERROR_OAUTH`: OAuth application credentials rejected.
    WrongClient,
    /// `ERROR_METHOD_NOT_FOUND`: the REST method does not exist on this portal.
    MethodNotFound,
    /// `PAYMENT_REQUIRED`: the portal's subscription does not cover this call.
    PaymentRequired,
    /// `NO_AUTH_FOUND`: the portal was renamed or the webhook was deleted.
    PortalRenamed,
    /// `INSUFFICIENT_SCOPE`: the token lacks the scope this method needs.
    InsufficientScope,
    /// `QUERY_LIMIT_EXCEEDED`: request intensity limit hit.
    QueryLimitExceeded,
    /// Any other error code.
    Other,
}

impl ApiError {
    /// Builds an [`ApiError`] from the envelope's `error` and
    /// `error_description` fields. Codes are matched after trimming and
    /// upper-casing; unknown codes classify as [`ApiErrorKind::Other`].
    pub fn from_envelope(code: &str, description: Option<&str>) -> Self {
        let kind = match code.trim().to_uppercase().as_str() {
            "EXPIRED_TOKEN" => ApiErrorKind::ExpiredToken,
            "INVALID_TOKEN" | "INVALID_GRANT" => ApiErrorKind::InvalidToken,
            "WRONG_CLIENT" | "ERROR_OAUTH" => ApiErrorKind::WrongClient,
            "ERROR_METHOD_NOT_FOUND" => ApiErrorKind::MethodNotFound,
            "PAYMENT_REQUIRED" => ApiErrorKind::PaymentRequired,
            "NO_AUTH_FOUND" => ApiErrorKind::PortalRenamed,
            "INSUFFICIENT_SCOPE" => ApiErrorKind::InsufficientScope,
            "QUERY_LIMIT_EXCEEDED" => ApiErrorKind::QueryLimitExceeded,
            _ => ApiErrorKind::Other,
        };
        Self {
            kind,
            code: code.to_string(),
            description: description.unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        let cases = [
            ("EXPIRED_TOKEN", ApiErrorKind::ExpiredToken),
            ("INVALID_TOKEN", ApiErrorKind::InvalidToken),
            ("INVALID_GRANT", ApiErrorKind::InvalidToken),
            ("WRONG_CLIENT", ApiErrorKind::WrongClient),
            ("ERROR_OAUTH", ApiErrorKind::WrongClient),
            ("ERROR_METHOD_NOT_FOUND", ApiErrorKind::MethodNotFound),
            ("PAYMENT_REQUIRED", ApiErrorKind::PaymentRequired),
            ("NO_AUTH_FOUND", ApiErrorKind::PortalRenamed),
            ("INSUFFICIENT_SCOPE", ApiErrorKind::InsufficientScope),
            ("QUERY_LIMIT_EXCEEDED", ApiErrorKind::QueryLimitExceeded),
        ];
        for (code, kind) in cases {
            let err = ApiError::from_envelope(code, None);
            assert_eq!(err.kind, kind, "code {code}");
        }
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let err = ApiError::from_envelope("  expired_token ", None);
        assert_eq!(err.kind, ApiErrorKind::ExpiredToken);
        // The original code is kept as sent.
        assert_eq!(err.code, "  expired_token ");
    }

    #[test]
    fn unknown_code_is_other() {
        let err = ApiError::from_envelope("INTERNAL_SERVER_ERROR", Some("boom"));
        assert_eq!(err.kind, ApiErrorKind::Other);
        assert_eq!(err.description, "boom");
    }

    #[test]
    fn display_is_code_dash_description() {
        let err = ApiError::from_envelope("EXPIRED_TOKEN", Some("token expired"));
        assert_eq!(err.to_string(), "EXPIRED_TOKEN - token expired");

        let err = ApiError::from_envelope("EXPIRED_TOKEN", None);
        assert_eq!(err.to_string(), "EXPIRED_TOKEN - ");
    }
}
