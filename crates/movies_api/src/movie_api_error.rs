//! Helper utilities for returning failed lookups to clients.

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use moviefinder_resolver::{ResolveError, INVALID_REQUEST_MESSAGE};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

const NOT_FOUND_PREFIX: &str = "Status 404. Not found. ";

/// Body sent when the request has no usable title.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvalidRequestBody {
    expression: Option<String>,
    results: Option<Value>,
    invalid_request: String,
}

impl Default for InvalidRequestBody {
    fn default() -> Self {
        InvalidRequestBody {
            expression: None,
            results: None,
            invalid_request: String::from(INVALID_REQUEST_MESSAGE),
        }
    }
}

/// Body sent for failures that are neither an invalid request nor a not-found.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ErrorBody {
    expression: Option<String>,
    results: Option<Value>,
    error: String,
}

/// A failed lookup, together with the title the client asked for.
#[derive(Debug)]
pub struct MovieApiError {
    expression: String,
    error: ResolveError,
}

impl MovieApiError {
    pub fn new(expression: &str, error: ResolveError) -> Self {
        MovieApiError {
            expression: String::from(expression),
            error,
        }
    }
}

impl ResponseError for MovieApiError {
    /// Only not-found failures change the status; every other failure is described in a
    /// successful JSON body.
    fn status_code(&self) -> StatusCode {
        match self.error {
            ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.error {
            ResolveError::InvalidRequest => HttpResponse::Ok().json(InvalidRequestBody::default()),
            ResolveError::NotFound(message) => HttpResponse::NotFound()
                .insert_header(ContentType::plaintext())
                .body(format!("{}{}", NOT_FOUND_PREFIX, message)),
            other => HttpResponse::Ok().json(ErrorBody {
                expression: Some(self.expression.clone()),
                results: None,
                error: other.to_string(),
            }),
        }
    }
}

impl Display for MovieApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}
