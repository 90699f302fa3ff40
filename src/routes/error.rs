use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::storage::StorageError;

#[derive(thiserror::Error)]
pub enum EmailApiError {
    #[error("Method not allowed.")]
    MethodNotAllowed,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    StorageFailure(#[source] StorageError),
    #[error("{0}")]
    RetrievalFailure(#[source] StorageError),
    #[error("Failed to serialize the response body.")]
    SerializationFailure(#[from] serde_json::Error),
}

impl EmailApiError {
    /// Maps a failure of the primary statement of a request. Argument errors
    /// raised by the storage layer keep their own kind.
    pub fn from_storage(err: StorageError) -> Self {
        match err {
            StorageError::InvalidArgument(message) => EmailApiError::InvalidArgument(message),
            err => EmailApiError::StorageFailure(err),
        }
    }
}

impl std::fmt::Debug for EmailApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    #[serde(rename = "Err")]
    err: String,
}

impl ResponseError for EmailApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            EmailApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            EmailApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            EmailApiError::StorageFailure(_) => StatusCode::BAD_REQUEST,
            EmailApiError::RetrievalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EmailApiError::SerializationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            EmailApiError::MethodNotAllowed | EmailApiError::SerializationFailure(_) => {
                HttpResponse::build(self.status_code()).finish()
            }
            _ => HttpResponse::build(self.status_code())
                .json(ErrorBody {
                    err: self.to_string(),
                }),
        }
    }
}
