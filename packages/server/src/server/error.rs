//! Mapping of lead job errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domains::leads::LeadJobError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error returned by the HTTP handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<LeadJobError> for ApiError {
    fn from(err: LeadJobError) -> Self {
        match err {
            LeadJobError::Validation(message) => Self::bad_request(message),
            LeadJobError::NotFound(id) => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody {
                    error: "Lead list not found".to_string(),
                    details: Some(id.to_string()),
                },
            },
            LeadJobError::Conflict(id) => Self {
                status: StatusCode::CONFLICT,
                body: ErrorBody {
                    error: "Lead list is still importing".to_string(),
                    details: Some(id.to_string()),
                },
            },
            LeadJobError::Store(e) => {
                error!(error = %e, "Lead job storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        error: "Internal server error".to_string(),
                        details: Some(format!("{:#}", e)),
                    },
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
