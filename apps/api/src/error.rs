use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

/// Uniform error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub code: u16,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Bad request: {message}")]
    BadRequest { message: String },
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("Not found: {message}")]
    NotFound { message: String },
    #[error("Conflict: {message}")]
    Conflict { message: String },
    #[error("Internal error: {message}")]
    Internal { message: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable slug for the `error` field of the response body.
    fn slug(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Internal { .. } | AppError::Db { .. } | AppError::Config { .. } => {
                "internal_error"
            }
        }
    }

    /// Client-facing message. Database and configuration details never
    /// reach the client; they are logged where the error is raised.
    fn message(&self) -> String {
        match self {
            AppError::Validation { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Internal { message } => message.clone(),
            AppError::Db { .. } => "database error".to_string(),
            AppError::Config { .. } => "configuration error".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } | AppError::Db { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("{e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        HttpResponse::build(status).json(ErrorBody {
            error: self.slug().to_string(),
            message: self.message(),
            code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn slug_and_status_per_variant() {
        let cases = [
            (AppError::validation("v"), "validation_error", 400),
            (AppError::bad_request("b"), "bad_request", 400),
            (AppError::unauthorized("u"), "unauthorized", 401),
            (AppError::not_found("n"), "not_found", 404),
            (AppError::conflict("c"), "conflict", 409),
            (AppError::internal("i"), "internal_error", 500),
            (AppError::db("d"), "internal_error", 500),
        ];
        for (err, slug, status) in cases {
            assert_eq!(err.slug(), slug);
            assert_eq!(err.status().as_u16(), status);
        }
    }

    #[test]
    fn db_detail_is_not_client_visible() {
        let err = AppError::db("connection refused at 10.0.0.1");
        assert_eq!(err.message(), "database error");
    }
}
