use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, Tenant, router, run_with_listener, spawn_with_listener};

mod expense;
mod forms;
mod recurring;
mod server;
mod share;
mod summary;

pub mod types {
    pub mod expense {
        pub use api_types::expense::ExpenseView;
    }

    pub mod recurring {
        pub use api_types::recurring::RecurringView;
    }

    pub mod share {
        pub use api_types::share::ShareCreated;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::AuthRequired => StatusCode::UNAUTHORIZED,
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::UnsupportedAttachment(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        EngineError::KeyNotFound(_) | EngineError::NoAttachment(_) => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
