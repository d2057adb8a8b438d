use rouille::Response;

use crate::{http::auth::AuthRejection, storage::error::ResolveError};

/// Every way a request can fail, as seen by the client.
///
/// Bodies are fixed tokens; details belong in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    MissingToken,
    InvalidToken,
    TrackNotFound,
    Internal,
}

impl From<AuthRejection> for ApiError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::MissingToken => ApiError::MissingToken,
            AuthRejection::InvalidToken => ApiError::InvalidToken,
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(_) => ApiError::TrackNotFound,
        }
    }
}

impl ApiError {
    pub fn status_code(self) -> u16 {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => 403,
            ApiError::TrackNotFound => 404,
            ApiError::Internal => 500,
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            ApiError::MissingToken => "MISSING_TOKEN",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::TrackNotFound => "TRACK_NOT_FOUND",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn into_response(self) -> Response {
        Response::from_data("text/plain", self.body()).with_status_code(self.status_code())
    }
}
