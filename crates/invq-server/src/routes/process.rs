//! `POST /process`: extract one document and record the outcome.
//!
//! Status sequence per request:
//! 1. queue item and attachment → `processing`
//! 2. extract fields from `file_url`
//! 3. build and insert the invoice record
//! 4. queue item and attachment → `completed`
//!
//! Any failure marks both records `error` with the failure message and
//! answers 500 with the same message.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use invq_core::InvoiceRecord;
use invq_datastore::{DatastoreError, ProcessingStatus};

use crate::error::{ApiError, AppJson};
use crate::state::AppState;

/// Body of `POST /process`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    pub file_url: String,
    pub user_id: String,
    pub attachment_id: String,
    pub queue_item_id: String,
}

/// Successful answer of `POST /process`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub invoice_data: InvoiceRecord,
}

pub async fn process_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    info!(
        queue_item_id = %request.queue_item_id,
        attachment_id = %request.attachment_id,
        "Processing document"
    );

    match process(&state, &request).await {
        Ok(invoice) => {
            info!(
                queue_item_id = %request.queue_item_id,
                attachment_id = %request.attachment_id,
                "Document processed"
            );
            Ok(Json(ProcessResponse {
                status: "success",
                invoice_data: invoice,
            }))
        }
        Err(err) => {
            let message = err.to_string();
            error!(
                queue_item_id = %request.queue_item_id,
                attachment_id = %request.attachment_id,
                error = %message,
                "Document processing failed"
            );
            record_failure(&state, &request, &message).await;
            Err(err)
        }
    }
}

async fn process(state: &AppState, request: &ProcessRequest) -> Result<InvoiceRecord, ApiError> {
    set_status(state, request, ProcessingStatus::Processing).await?;

    let fields = state.extractor.extract(&request.file_url).await?;
    let invoice = InvoiceRecord::from_fields(&request.user_id, &fields, Utc::now())?;

    if !state.datastore.create_invoice(&invoice).await? {
        warn!(queue_item_id = %request.queue_item_id, "Invoice insert was not acknowledged");
    }

    set_status(state, request, ProcessingStatus::Completed).await?;
    Ok(invoice)
}

async fn set_status(
    state: &AppState,
    request: &ProcessRequest,
    status: ProcessingStatus,
) -> Result<(), DatastoreError> {
    let datastore = &state.datastore;

    if !datastore
        .update_queue_status(&request.queue_item_id, status, None)
        .await?
    {
        warn!(queue_item_id = %request.queue_item_id, %status, "Queue status update was not acknowledged");
    }

    if !datastore
        .update_attachment_status(&request.attachment_id, status, None)
        .await?
    {
        warn!(attachment_id = %request.attachment_id, %status, "Attachment status update was not acknowledged");
    }

    Ok(())
}

/// Mark both records as failed. Never fails; problems are only logged.
async fn record_failure(state: &AppState, request: &ProcessRequest, message: &str) {
    let status = ProcessingStatus::Error;
    let datastore = &state.datastore;

    match datastore
        .update_queue_status(&request.queue_item_id, status, Some(message))
        .await
    {
        Ok(true) => {}
        Ok(false) => warn!(queue_item_id = %request.queue_item_id, "Queue error status was not acknowledged"),
        Err(e) => error!(queue_item_id = %request.queue_item_id, error = %e, "Failed to record queue error status"),
    }

    match datastore
        .update_attachment_status(&request.attachment_id, status, Some(message))
        .await
    {
        Ok(true) => {}
        Ok(false) => warn!(attachment_id = %request.attachment_id, "Attachment error status was not acknowledged"),
        Err(e) => error!(attachment_id = %request.attachment_id, error = %e, "Failed to record attachment error status"),
    }
}
