//! Recurring-expense API endpoints

use api_types::recurring::RecurringView;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use std::collections::HashMap;

use crate::{
    ServerError,
    expense::map_frequency,
    forms,
    server::{ServerState, Tenant},
};
use engine::NewRecurring;

fn map_recurring(definition: engine::RecurringDefinition) -> RecurringView {
    RecurringView {
        id: definition.id,
        start_date: definition.start_date,
        description: definition.description,
        amount: definition.amount,
        frequency: map_frequency(definition.frequency),
    }
}

async fn read_recurring_form(mut multipart: Multipart) -> Result<NewRecurring, ServerError> {
    let mut new = NewRecurring::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "start_date" => new.start_date = forms::text(field).await?,
            "amount" => new.amount = forms::parse_amount(&forms::text(field).await?)?,
            "description" => {
                new.description = Some(forms::text(field).await?).filter(|d| !d.is_empty());
            }
            "frequency" => {
                new.frequency = Some(forms::text(field).await?).filter(|f| !f.is_empty());
            }
            _ => {}
        }
    }

    Ok(new)
}

pub async fn add(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RecurringView>), ServerError> {
    let new = read_recurring_form(multipart).await?;
    let definition = state.engine.add_recurring(&tenant.0, new)?;

    Ok((StatusCode::CREATED, Json(map_recurring(definition))))
}

pub async fn list(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
) -> Json<HashMap<u64, RecurringView>> {
    let definitions = state
        .engine
        .recurring_list(&tenant.0)
        .into_iter()
        .map(|(id, definition)| (id, map_recurring(definition)))
        .collect();

    Json(definitions)
}

pub async fn delete(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(recurring_id): Path<u64>,
) -> Result<&'static str, ServerError> {
    state.engine.delete_recurring(&tenant.0, recurring_id)?;

    Ok("Recurring expense deleted successfully")
}
