//! Share-link API endpoints
//!
//! Reading a shared expense needs no credential at all; minting a token
//! and cloning write into a tenant ledger, so they stay behind auth.

use api_types::{expense::ExpenseView, share::ShareCreated};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    ServerError,
    expense::{attachment_response, map_expense},
    server::{ServerState, Tenant},
};

pub async fn create(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(expense_id): Path<u64>,
) -> Result<(StatusCode, Json<ShareCreated>), ServerError> {
    let token = state.engine.share_expense(&tenant.0, expense_id)?;

    Ok((StatusCode::CREATED, Json(ShareCreated { token })))
}

pub async fn get_shared(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.shared_expense(&token)?;

    Ok(Json(map_expense(expense)))
}

pub async fn get_shared_attachment(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> Result<Response, ServerError> {
    let attachment = state.engine.shared_attachment(&token)?;

    attachment_response(attachment)
}

pub async fn clone_shared(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state.engine.clone_shared(&tenant.0, &token)?;

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}
