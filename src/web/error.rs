use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::Error;

/// Body returned whenever an edit cannot find its book.
pub const NOT_FOUND_BODY: &str = "Book not found.";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidInput(_) | Error::DuplicateTitle(_) | Error::RatingOutOfRange(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            Error::NotFound(_) => NOT_FOUND_BODY.to_string(),
            ref e if status.is_server_error() => {
                error!(error = %e, "request failed");
                "Internal server error.".to_string()
            }
            e => e.to_string(),
        };

        (status, body).into_response()
    }
}

/// A body that cannot be read as a urlencoded form is bad input, whatever
/// axum's reason for rejecting it.
impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}
