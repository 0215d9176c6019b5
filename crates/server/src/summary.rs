//! Summary API endpoints
//!
//! Summaries are plain-text lines, not JSON. Totals always print with
//! two decimals.

use axum::{
    Extension,
    extract::{Path, State},
};

use crate::{
    ServerError,
    server::{ServerState, Tenant},
};

pub async fn total(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
) -> String {
    let total = state.engine.total_amount(&tenant.0);

    format!("Total expenses: ${total:.2}")
}

pub async fn month(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(month): Path<u32>,
) -> Result<String, ServerError> {
    let (total, name) = state.engine.month_total(&tenant.0, month)?;

    Ok(format!("Total expenses for {name}: ${total:.2}"))
}
