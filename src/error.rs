/*
 * Responsibility
 * - crate 共通の AgentError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - ParseError / ConfigError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::oauth2::ParseError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid authorization callback: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AgentError::Parse(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_CALLBACK",
                self.to_string(),
            ),
            // Do not echo configuration details to the client.
            AgentError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_maps_to_bad_request() {
        let res = AgentError::from(ParseError::MissingCode).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn config_error_maps_to_internal() {
        let res = AgentError::from(ConfigError::Missing("OIDC_CALLBACK_URL")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn display_includes_cause() {
        let err = AgentError::from(ParseError::DuplicateParameter("state".into()));
        assert_eq!(
            err.to_string(),
            "invalid authorization callback: duplicate parameter: state"
        );
    }
}
