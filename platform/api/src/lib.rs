use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    InvalidInput(String),
    /// A business rule refused the request; the caller can correct and retry.
    #[error("{message}")]
    Rejected {
        code: &'static str,
        message: String,
    },
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Rejected { code, .. } => code,
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    pub fn rejected(code: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        match self {
            ApiError::InvalidInput(_) => {
                err = err.extend_with(|_err, e| {
                    e.set("type", "BAD_REQUEST");
                });
            }
            ApiError::Rejected { .. } => {
                err = err.extend_with(|_err, e| {
                    e.set("type", "RULE_VIOLATION");
                });
            }
            ApiError::NotFound | ApiError::Internal(_) => {}
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}
