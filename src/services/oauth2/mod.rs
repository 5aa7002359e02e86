/*
 * Responsibility
 * - OAuth2 authorization response (RFC 6749 §4.1.2) の型と parse
 * - ResponseAdapter は RequestResolver に注入される collaborator
 */
pub mod adapter;
pub mod response;

pub use adapter::{QueryResponseAdapter, ResponseAdapter};
pub use response::{AuthorizationResponse, ParseError};
