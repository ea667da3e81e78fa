// src/error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::NaiveDate;
use log::error;
use thiserror::Error;

/// Errors surfaced by the scheduling service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request data failed a boundary check.
    #[error("Validation error: {0}")]
    Validation(String),

    /// `startDate` falls after `dueDate`.
    #[error("Invalid interval: start date {start} is after due date {due}")]
    InvalidInterval { start: NaiveDate, due: NaiveDate },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The proposed assignment double-books the listed people.
    #[error("Scheduling conflict for: {}", conflicts.join(", "))]
    Conflict { conflicts: Vec<String> },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidInterval { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }

        let body = match self {
            Self::Conflict { conflicts } => serde_json::json!({
                "error": self.to_string(),
                "conflicts": conflicts,
            }),
            // Driver messages stay in the log.
            Self::Database(_) => serde_json::json!({ "error": "Database error" }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        HttpResponse::build(status).json(body)
    }
}
