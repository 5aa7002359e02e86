//! Per-request classification predicates for the OIDC relying-party flow.
//!
//! `RequestResolver` borrows the request, the shared config and the response
//! adapter for the duration of one request. Every predicate is a pure function
//! of those inputs: nothing here logs, caches or mutates.
//!
//! Path matching is deliberately not unified:
//! - logout: relative path *ends with* the configured logout URL
//! - skip URIs: relative path is an exact member of the set
//! - callback: relative path exactly equals the callback URL's path

use crate::config::AgentConfig;
use crate::request::RequestView;
use crate::services::oauth2::{ParseError, ResponseAdapter};

/// Query parameter carrying an OAuth2 error response (`access_denied`, ...).
pub const ERROR_PARAM: &str = "error";

pub struct RequestResolver<'a> {
    request: &'a dyn RequestView,
    config: &'a AgentConfig,
    adapter: &'a dyn ResponseAdapter,
}

impl<'a> RequestResolver<'a> {
    pub fn new(
        request: &'a dyn RequestView,
        config: &'a AgentConfig,
        adapter: &'a dyn ResponseAdapter,
    ) -> Self {
        Self {
            request,
            config,
            adapter,
        }
    }

    /// The authorization server redirected back with an error.
    ///
    /// Check this before `is_authorization_code_response`: both arrive on the
    /// callback endpoint.
    pub fn is_error(&self) -> bool {
        self.request
            .query_parameter(ERROR_PARAM)
            .is_some_and(|error| !error.is_empty())
    }

    /// The request parses as a successful authorization response.
    ///
    /// A malformed response is returned as `Err`, not `Ok(false)`: "broken
    /// callback" and "not a callback" need different handling upstream.
    pub fn is_authorization_code_response(&self) -> Result<bool, ParseError> {
        let response = self.adapter.parse(self.request)?;
        Ok(response.indicates_success())
    }

    pub fn is_logout_url(&self) -> bool {
        let logout_url = self.config.logout_url();
        // An empty suffix would match every request.
        !logout_url.is_empty() && self.request.relative_path().ends_with(logout_url)
    }

    pub fn is_skip_uri(&self) -> bool {
        self.config
            .skip_uris()
            .contains(self.request.relative_path())
    }

    pub fn is_callback_response(&self) -> bool {
        self.request.relative_path() == self.config.callback_path()
    }

    /// Landing page after login: configured index page, else the context root.
    pub fn index_page(&self) -> String {
        let index_page = self.config.index_page();
        if index_page.is_empty() {
            self.request.context_path().to_string()
        } else {
            index_page.to_string()
        }
    }
}

impl std::fmt::Debug for RequestResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestResolver")
            .field("request_uri", &self.request.request_uri())
            .field("context_path", &self.request.context_path())
            .field("config", &self.config)
            .finish()
    }
}
