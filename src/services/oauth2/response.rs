//! OAuth2 authorization response (RFC 6749 §4.1.2 / §4.1.2.1).
//!
//! The redirect back from the authorization server carries either a success
//! payload (`code` + optional `state`) or an error payload (`error` + optional
//! description/uri/state). Both share the callback endpoint.

use thiserror::Error;

/// Parsed authorization response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResponse {
    Success {
        code: String,
        state: Option<String>,
    },
    Error {
        error: String,
        error_description: Option<String>,
        error_uri: Option<String>,
        state: Option<String>,
    },
}

impl AuthorizationResponse {
    pub fn indicates_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn state(&self) -> Option<&str> {
        match self {
            Self::Success { state, .. } | Self::Error { state, .. } => state.as_deref(),
        }
    }
}

/// The callback request could not be read as a well-formed authorization response.
///
/// Distinct from "not a callback": the caller should render an authentication
/// failure instead of treating the request as ordinary traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing authorization response parameters")]
    MissingParameters,
    #[error("missing authorization code")]
    MissingCode,
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),
    #[error("invalid encoding in parameter: {0}")]
    InvalidEncoding(String),
}
