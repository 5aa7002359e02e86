//! Routing outcome for one request, using the resolver's predicates as guards.
//!
//! Precedence: skip URIs bypass everything; a hit on the callback endpoint is
//! an error response if `error` is set, otherwise it must parse as an
//! authorization code response; the logout endpoint comes next; everything
//! else is a protected resource.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use serde::Serialize;

use crate::error::AgentError;
use crate::request::{HttpRequestView, RequestResolver, RequestView};
use crate::services::oauth2::ParseError;
use crate::state::AgentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Skip,
    CallbackError,
    AuthorizationCode,
    Logout,
    Protected,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::CallbackError => "callback_error",
            Self::AuthorizationCode => "authorization_code",
            Self::Logout => "logout",
            Self::Protected => "protected",
        }
    }

    pub fn requires_authentication(&self) -> bool {
        matches!(self, Self::Protected)
    }
}

pub fn classify(resolver: &RequestResolver<'_>) -> Result<Classification, ParseError> {
    if resolver.is_skip_uri() {
        return Ok(Classification::Skip);
    }

    if resolver.is_callback_response() {
        if resolver.is_error() {
            return Ok(Classification::CallbackError);
        }
        return Ok(if resolver.is_authorization_code_response()? {
            Classification::AuthorizationCode
        } else {
            Classification::CallbackError
        });
    }

    if resolver.is_logout_url() {
        return Ok(Classification::Logout);
    }

    Ok(Classification::Protected)
}

/// Extractor: classify the current request against the shared `AgentState`.
///
/// Rejects malformed callbacks with `AgentError::Parse` (400).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub classification: Classification,
    pub index_page: String,
}

impl<S> FromRequestParts<S> for Classified
where
    S: Send + Sync,
    AgentState: FromRef<S>,
{
    type Rejection = AgentError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AgentState::from_ref(state);
        let view = HttpRequestView::from_parts(parts);
        let resolver = RequestResolver::new(&view, &state.config, state.adapter.as_ref());

        let classification = classify(&resolver).map_err(|err| {
            tracing::warn!(error = %err, uri = view.request_uri(), "malformed authorization callback");
            AgentError::from(err)
        })?;

        Ok(Self {
            classification,
            index_page: resolver.index_page(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::OriginalUri;
    use axum::http::Request;

    use super::*;
    use crate::config::AgentConfig;
    use crate::services::oauth2::QueryResponseAdapter;

    fn config() -> AgentConfig {
        AgentConfig::builder("https://rp.example.com/callback")
            .logout_url("/logout")
            .skip_uris(["/health", "/callback"])
            .index_page("/home")
            .build()
            .unwrap()
    }

    fn classify_path(
        config: &AgentConfig,
        path: &str,
        query: Option<&str>,
    ) -> Result<Classification, ParseError> {
        let mut request = HttpRequestView::new(path, "");
        if let Some(query) = query {
            request = request.with_query(query);
        }
        let resolver = RequestResolver::new(&request, config, &QueryResponseAdapter);
        classify(&resolver)
    }

    #[test]
    fn skip_takes_precedence_over_callback() {
        let config = config();
        assert_eq!(
            classify_path(&config, "/callback", Some("code=abc")),
            Ok(Classification::Skip)
        );
        assert_eq!(classify_path(&config, "/health", None), Ok(Classification::Skip));
    }

    #[test]
    fn callback_routes_on_error_then_code() {
        let config = AgentConfig::builder("https://rp.example.com/callback").build().unwrap();

        assert_eq!(
            classify_path(&config, "/callback", Some("error=access_denied&code=abc")),
            Ok(Classification::CallbackError)
        );
        assert_eq!(
            classify_path(&config, "/callback", Some("code=abc&state=xyz")),
            Ok(Classification::AuthorizationCode)
        );
        assert_eq!(
            classify_path(&config, "/callback", Some("error=%20&code=abc")),
            Ok(Classification::CallbackError)
        );
        assert_eq!(
            classify_path(&config, "/callback", Some("state=xyz")),
            Err(ParseError::MissingCode)
        );
    }

    #[test]
    fn logout_and_protected() {
        let config = config();
        assert_eq!(classify_path(&config, "/app/logout", None), Ok(Classification::Logout));
        assert_eq!(classify_path(&config, "/orders/42", None), Ok(Classification::Protected));
        assert!(Classification::Protected.requires_authentication());
        assert!(!Classification::Logout.requires_authentication());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Classification::AuthorizationCode).unwrap();
        assert_eq!(json, "\"authorization_code\"");
        assert_eq!(Classification::CallbackError.as_str(), "callback_error");
    }

    #[tokio::test]
    async fn extractor_uses_nest_prefix_as_context() {
        let state = AgentState::new(
            Arc::new(AgentConfig::builder("/callback").build().unwrap()),
            Arc::new(QueryResponseAdapter),
        );

        let mut req = Request::builder().uri("/callback?code=abc").body(()).unwrap();
        req.extensions_mut()
            .insert(OriginalUri("/app/callback?code=abc".parse().unwrap()));
        let (mut parts, _) = req.into_parts();

        let classified = Classified::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(classified.classification, Classification::AuthorizationCode);
        assert_eq!(classified.index_page, "/app");
    }

    #[tokio::test]
    async fn extractor_rejects_malformed_callback() {
        let state = AgentState::new(
            Arc::new(AgentConfig::builder("/callback").build().unwrap()),
            Arc::new(QueryResponseAdapter),
        );

        let (mut parts, _) = Request::builder()
            .uri("/callback?code=a&code=b")
            .body(())
            .unwrap()
            .into_parts();

        let err = Classified::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Parse(ParseError::DuplicateParameter(ref name)) if name == "code"
        ));
    }
}
