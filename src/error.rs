use std::collections::BTreeMap;

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Key used for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";
pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const NULL_MESSAGE: &str = "This field may not be null.";

/// Offending fields and their messages, serialized as `{"field": ["message"]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the field errors reported by a `validator` derive.
    pub fn collect(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self::new(),
            Err(errors) => Self::from(errors),
        }
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Replaces whatever was recorded for `field`.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), vec![message.into()]);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok` when nothing was recorded, `ValidationFailed` otherwise.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationFailed(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = match error.message.as_ref() {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

pub fn invalid_reference(id: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        ApiError::ValidationFailed(errors)
    }

    /// Maps constraint violations raised by an INSERT or UPDATE back onto the
    /// payload field that caused them. `reference` names the foreign-key field.
    pub fn from_write(err: sqlx::Error, reference: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return ApiError::field(reference, "Referenced object does not exist.");
            }
            if db_err.is_check_violation() && db_err.constraint() == Some("review_stars_range") {
                return ApiError::field("stars", STARS_RANGE_MESSAGE);
            }
        }
        ApiError::Database(err)
    }

    /// A DELETE blocked by rows that still reference the target.
    pub fn from_delete(err: sqlx::Error, conflict: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                ApiError::Conflict(conflict.to_string())
            }
            _ => ApiError::Database(err),
        }
    }
}

pub const STARS_RANGE_MESSAGE: &str = "Ensure this value is between 1 and 5.";

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound(_) => {
                tracing::info!("{}", self);
                HttpResponse::NotFound().json(json!({ "error": self.to_string() }))
            }
            ApiError::ValidationFailed(errors) => {
                tracing::info!("Rejected payload {:?}", errors);
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
            ApiError::Conflict(message) => {
                tracing::info!("Conflict: {}", message);
                HttpResponse::Conflict().json(json!({ "error": message }))
            }
            ApiError::Database(err) => {
                tracing::error!("Database error {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Database error",
                    "detail": err.to_string()
                }))
            }
        }
    }
}

/// Bodies that do not deserialize are reported like any other invalid payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::Deserialize(err) => {
            ApiError::field(NON_FIELD_ERRORS, err.to_string()).into()
        }
        JsonPayloadError::ContentType => {
            ApiError::field(NON_FIELD_ERRORS, "Expected an application/json body.").into()
        }
        other => other.into(),
    }
}
