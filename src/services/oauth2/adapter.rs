//! Request → authorization response adapter.
//!
//! `RequestResolver` never parses the callback itself; it asks a
//! `ResponseAdapter` injected at construction time. Tests hand in fakes.

use std::borrow::Cow;
use std::collections::HashMap;
use std::str::Utf8Error;

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::request::RequestView;
use crate::services::oauth2::response::{AuthorizationResponse, ParseError};

/// Converts a request into a parsed OAuth2 authorization response.
///
/// Implementations must not block: they run inline with request handling.
pub trait ResponseAdapter: Send + Sync {
    fn parse(&self, request: &dyn RequestView) -> Result<AuthorizationResponse, ParseError>;
}

/// Reads the authorization response from the query string (`response_mode=query`).
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResponseAdapter;

impl QueryResponseAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseAdapter for QueryResponseAdapter {
    fn parse(&self, request: &dyn RequestView) -> Result<AuthorizationResponse, ParseError> {
        let query = request.query_string().unwrap_or_default();
        let result = decode_params(query).and_then(|params| from_params(&params));

        if let Err(err) = &result {
            debug!(error = %err, uri = request.request_uri(), "malformed authorization response");
        }
        result
    }
}

// Parameters that RFC 6749 allows at most once in an authorization response.
const SINGLE_VALUED: [&str; 5] = ["code", "state", "error", "error_description", "error_uri"];

type Params = HashMap<String, Vec<String>>;

fn decode_params(query: &str) -> Result<Params, ParseError> {
    let mut params = Params::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key)
            .map_err(|_| ParseError::InvalidEncoding(raw_key.to_string()))?;
        let value =
            decode_component(raw_value).map_err(|_| ParseError::InvalidEncoding(key.clone()))?;

        params.entry(key).or_default().push(value);
    }

    if params.is_empty() {
        return Err(ParseError::MissingParameters);
    }
    Ok(params)
}

// application/x-www-form-urlencoded, rejecting percent sequences that are not UTF-8.
fn decode_component(raw: &str) -> Result<String, Utf8Error> {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8().map(Cow::into_owned)
}

fn from_params(params: &Params) -> Result<AuthorizationResponse, ParseError> {
    for name in SINGLE_VALUED {
        single(params, name)?;
    }

    let state = non_empty(single(params, "state")?);

    if let Some(error) = non_empty(single(params, "error")?) {
        return Ok(AuthorizationResponse::Error {
            error,
            error_description: non_empty(single(params, "error_description")?),
            error_uri: non_empty(single(params, "error_uri")?),
            state,
        });
    }

    let code = non_empty(single(params, "code")?).ok_or(ParseError::MissingCode)?;
    Ok(AuthorizationResponse::Success { code, state })
}

fn single(params: &Params, name: &str) -> Result<Option<String>, ParseError> {
    match params.get(name).map(Vec::as_slice) {
        None | Some([]) => Ok(None),
        Some([value]) => Ok(Some(value.clone())),
        Some(_) => Err(ParseError::DuplicateParameter(name.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
