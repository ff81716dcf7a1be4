//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::BackOfficeError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<BackOfficeError> for Problem {
    fn from(error: BackOfficeError) -> Self {
        map_domain_error(error)
    }
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        Problem::new(rejection.status(), "Invalid Request Body").with_detail(rejection.body_text())
    }
}

impl From<PathRejection> for Problem {
    fn from(rejection: PathRejection) -> Self {
        Problem::new(rejection.status(), "Invalid Path Parameter").with_detail(rejection.body_text())
    }
}

impl From<QueryRejection> for Problem {
    fn from(rejection: QueryRejection) -> Self {
        Problem::new(rejection.status(), "Invalid Query String").with_detail(rejection.body_text())
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: BackOfficeError) -> Problem {
    match error {
        BackOfficeError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        BackOfficeError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        BackOfficeError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        BackOfficeError::ArchiveUnavailable => {
            Problem::new(StatusCode::SERVICE_UNAVAILABLE, "Archive Unavailable")
                .with_detail("The document archive is not connected")
        }

        BackOfficeError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_unavailable_maps_to_503() {
        let problem = map_domain_error(BackOfficeError::ArchiveUnavailable);
        assert_eq!(problem.status, 503);
    }

    #[test]
    fn not_found_names_the_resource() {
        let problem = map_domain_error(BackOfficeError::not_found("creator", 7));
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "creator Not Found");
        assert_eq!(
            problem.detail.as_deref(),
            Some("creator with id '7' was not found")
        );
    }

    #[test]
    fn problem_response_uses_problem_json_content_type() {
        let response = Problem::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid Request Body")
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
