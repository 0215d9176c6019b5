//! Expense ledger API endpoints

use api_types::expense::ExpenseView;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::Response,
};

use std::collections::HashMap;

use crate::{
    ServerError, forms,
    server::{ServerState, Tenant},
};
use engine::{NewAttachment, NewExpense};

pub(crate) fn map_frequency(frequency: engine::Frequency) -> api_types::Frequency {
    match frequency {
        engine::Frequency::Daily => api_types::Frequency::Daily,
        engine::Frequency::Weekly => api_types::Frequency::Weekly,
        engine::Frequency::Monthly => api_types::Frequency::Monthly,
        engine::Frequency::Yearly => api_types::Frequency::Yearly,
    }
}

pub(crate) fn map_expense(expense: engine::Expense) -> ExpenseView {
    let (attachment_filename, attachment_content_type) = match expense.attachment {
        Some(attachment) => (attachment.filename, Some(attachment.content_type)),
        None => (None, None),
    };

    ExpenseView {
        id: expense.id,
        date: expense.date,
        description: expense.description,
        amount: expense.amount,
        is_recurring: expense.is_recurring,
        frequency: expense.frequency.map(map_frequency),
        attachment_filename,
        attachment_content_type,
    }
}

/// Bytes plus stored metadata, served as a download.
pub(crate) fn attachment_response(attachment: engine::Attachment) -> Result<Response, ServerError> {
    let disposition = match &attachment.filename {
        // Stored filenames may carry quotes; they would break the header.
        Some(filename) => format!("attachment; filename=\"{}\"", filename.replace('"', "")),
        None => "attachment".to_string(),
    };

    Response::builder()
        .header(header::CONTENT_TYPE, &attachment.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(axum::body::Body::from(attachment.bytes.to_vec()))
        .map_err(|err| ServerError::Generic(err.to_string()))
}

async fn read_expense_form(mut multipart: Multipart) -> Result<NewExpense, ServerError> {
    let mut new = NewExpense::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "date" => new.date = forms::text(field).await?,
            "amount" => new.amount = forms::parse_amount(&forms::text(field).await?)?,
            "description" => {
                new.description = Some(forms::text(field).await?).filter(|d| !d.is_empty());
            }
            "is_recurring" => new.is_recurring = forms::truthy(&forms::text(field).await?),
            "frequency" => {
                new.frequency = Some(forms::text(field).await?).filter(|f| !f.is_empty());
            }
            "attachment" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ServerError::Generic(err.to_string()))?
                    .to_vec();

                // An empty file part without a filename is "no attachment".
                if filename.is_some() || !bytes.is_empty() {
                    new.attachment = Some(NewAttachment {
                        filename,
                        content_type,
                        bytes,
                    });
                }
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
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let new = read_expense_form(multipart).await?;
    let expense = state.engine.add_expense(&tenant.0, new)?;

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn list(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
) -> Json<HashMap<u64, ExpenseView>> {
    let expenses = state
        .engine
        .expenses(&tenant.0)
        .into_iter()
        .map(|(id, expense)| (id, map_expense(expense)))
        .collect();

    Json(expenses)
}

pub async fn get(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(expense_id): Path<u64>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(&tenant.0, expense_id)?;

    Ok(Json(map_expense(expense)))
}

pub async fn delete(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(expense_id): Path<u64>,
) -> Result<&'static str, ServerError> {
    state.engine.delete_expense(&tenant.0, expense_id)?;

    Ok("Expense deleted successfully")
}

pub async fn get_attachment(
    Extension(tenant): Extension<Tenant>,
    State(state): State<ServerState>,
    Path(expense_id): Path<u64>,
) -> Result<Response, ServerError> {
    let attachment = state.engine.attachment(&tenant.0, expense_id)?;

    attachment_response(attachment)
}
