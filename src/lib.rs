//! # oidc-agent
//!
//! Request classification for an OpenID Connect relying party.
//!
//! Given an inbound request and the static agent configuration, decide which
//! phase of the authorization code flow it belongs to:
//!
//! - a request that bypasses authentication (skip URI)
//! - an error redirect from the authorization server
//! - a successful authorization code redirect
//! - the logout-completion redirect
//! - anything else: a protected resource
//!
//! ```ignore
//! let config = AgentConfig::builder("https://rp.example.com/callback")
//!     .skip_uri("/health")
//!     .build()?;
//! let request = HttpRequestView::new("/callback", "").with_query("code=abc&state=xyz");
//! let resolver = RequestResolver::new(&request, &config, &QueryResponseAdapter);
//! assert_eq!(classify(&resolver)?, Classification::AuthorizationCode);
//! ```
//!
//! Token exchange, session storage and HTTP wiring live elsewhere; this crate
//! only answers "what is this request?".

pub mod config;
pub mod error;
pub mod request;
pub mod services;
pub mod state;

pub use config::{AgentConfig, AgentConfigBuilder, ConfigError};
pub use error::AgentError;
pub use request::{
    Classification, Classified, HttpRequestView, RequestResolver, RequestView, classify,
};
pub use services::oauth2::{
    AuthorizationResponse, ParseError, QueryResponseAdapter, ResponseAdapter,
};
pub use state::AgentState;
