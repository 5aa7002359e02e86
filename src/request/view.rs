//! Read-only view of an inbound request.
//!
//! The classifier only needs the path, the mount prefix and the query. Keeping
//! this behind a trait lets the resolver work on any HTTP stack, and keeps tests
//! free of real requests.

use axum::extract::OriginalUri;
use axum::http::{Extensions, Request, Uri, request::Parts};
use url::form_urlencoded;

pub trait RequestView {
    /// Request path including the mount prefix. No scheme, host or query.
    fn request_uri(&self) -> &str;

    /// Mount prefix of the application. Empty for root-mounted apps.
    fn context_path(&self) -> &str;

    /// Raw (still percent-encoded) query string.
    fn query_string(&self) -> Option<&str>;

    /// Single-valued lookup: the first occurrence wins.
    fn query_parameter(&self, name: &str) -> Option<String> {
        let query = self.query_string()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// `request_uri` with the mount prefix removed.
    ///
    /// The prefix is only stripped on a segment boundary (`/app` does not strip
    /// from `/application`). A request for the mount point itself maps to `/`.
    fn relative_path(&self) -> &str {
        let uri = self.request_uri();
        let context = self.context_path();
        if context.is_empty() {
            return uri;
        }

        match uri.strip_prefix(context) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => uri,
        }
    }
}

/// Owned request view built from `axum::http` types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequestView {
    path: String,
    query: Option<String>,
    context_path: String,
}

impl HttpRequestView {
    pub fn new(path: impl Into<String>, context_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            context_path: context_path.into(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn from_uri(uri: &Uri, context_path: impl Into<String>) -> Self {
        Self {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            context_path: context_path.into(),
        }
    }

    /// Build from request parts inside an axum handler or extractor.
    ///
    /// Under `Router::nest` the parts carry the inner URI; the full one lives in
    /// the `OriginalUri` extension and the difference is the mount prefix.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::from_uri_and_extensions(&parts.uri, &parts.extensions)
    }

    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self::from_uri_and_extensions(req.uri(), req.extensions())
    }

    fn from_uri_and_extensions(uri: &Uri, extensions: &Extensions) -> Self {
        match extensions.get::<OriginalUri>() {
            Some(OriginalUri(original)) => {
                let context = nest_prefix(original.path(), uri.path());
                Self::from_uri(original, context)
            }
            None => Self::from_uri(uri, ""),
        }
    }
}

impl RequestView for HttpRequestView {
    fn request_uri(&self) -> &str {
        &self.path
    }

    fn context_path(&self) -> &str {
        &self.context_path
    }

    fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

fn nest_prefix(original: &str, inner: &str) -> String {
    if let Some(prefix) = original.strip_suffix(inner) {
        return prefix.to_string();
    }
    // `/app` reaches the nested router as `/`
    if inner == "/" {
        return original.to_string();
    }
    String::new()
}
