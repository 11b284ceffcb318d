//! API error responses
//!
//! Two wire shapes, both kept byte-compatible with the deployed system:
//! `{"error": msg}` for authentication and upstream failures, and
//! `{"mensagem": msg, "status": "error"}` for registration failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

/// JSON body of an error response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message { error: String },
    Registration { mensagem: String, status: String },
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// 401 with `{"error": msg}`
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorBody::Message {
                error: message.into(),
            },
        }
    }

    /// 400 with `{"mensagem": msg, "status": "error"}`
    pub fn registration(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Registration {
                mensagem: message.into(),
                status: "error".to_string(),
            },
        }
    }

    /// 500 with `{"error": msg}`
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::Message {
                error: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation { message } | DomainError::Conflict { message } => {
                Self::registration(message)
            }
            DomainError::Unauthorized { message } => Self::unauthorized(message),
            DomainError::Storage { .. }
            | DomainError::Mail { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                tracing::error!("Request failed: {}", err);
                Self::internal(err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            ErrorBody::Message { error } => write!(f, "{}: {}", self.status, error),
            ErrorBody::Registration { mensagem, .. } => write!(f, "{}: {}", self.status, mensagem),
        }
    }
}

impl std::error::Error for ApiError {}
