//! Helpers for reading multipart form fields.

use axum::extract::multipart::Field;

use crate::ServerError;

pub(crate) async fn text(field: Field<'_>) -> Result<String, ServerError> {
    field
        .text()
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))
}

/// Form booleans as browsers and the web client send them.
pub(crate) fn truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, ServerError> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::Generic("Invalid amount".to_string()))
}
