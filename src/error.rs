use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

use crate::pagination::PageError;

/// Expected outcomes of catalog operations that the caller must handle.
///
/// None of these are transient, so nothing in the core retries on them.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    Existence(String),

    #[error("{0} already exists")]
    Uniqueness(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    Range { field: &'static str, value: f64, min: f64, max: f64 },

    #[error(transparent)]
    Page(#[from] PageError),

    /// The store rejected a write on its own uniqueness constraint after the
    /// service-level check had passed (concurrent writers on one natural key).
    #[error("storage conflict: {0}")]
    StorageConflict(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl CatalogError {
    pub fn missing_id(entity: &str, id: i32) -> Self {
        Self::Existence(format!("{entity} with id {id}"))
    }

    pub fn missing_name(entity: &str, name: &str) -> Self {
        Self::Existence(format!("{entity} '{name}'"))
    }

    pub fn duplicate(entity: &str, field: &str, value: &str) -> Self {
        Self::Uniqueness(format!("{entity} with {field} '{value}'"))
    }

    /// Translates a failed insert/update, surfacing store-level uniqueness
    /// violations as [`CatalogError::StorageConflict`].
    pub fn from_write(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!(what = %what, detail = %detail, "store rejected duplicate write");
                Self::StorageConflict(format!("{what}: {detail}"))
            },
            _ => Self::Database(err),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error returned from HTTP handlers, rendered as the failure envelope.
#[derive(Debug)]
pub enum AppError {
    Catalog(CatalogError),
    Validation(String),
    BadRequest(StatusCode, String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Catalog(err) => match err {
                CatalogError::Existence(_) => StatusCode::NOT_FOUND,
                CatalogError::Uniqueness(_) | CatalogError::StorageConflict(_) => {
                    StatusCode::CONFLICT
                },
                CatalogError::Range { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CatalogError::Page(PageError::OutOfRange { .. }) => StatusCode::NOT_FOUND,
                CatalogError::Page(PageError::InvalidParameters { .. }) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                },
                CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(status, _) => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Catalog(err) => err.fmt(f),
            AppError::Validation(msg) | AppError::BadRequest(_, msg) => {
                f.write_str(msg)
            },
            AppError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({
            "status": "failure",
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
