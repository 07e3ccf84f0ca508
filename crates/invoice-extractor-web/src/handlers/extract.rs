use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use std::sync::Arc;

use invoice_extractor_core::{InvoiceData, extract_invoice};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload;

pub async fn extract(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InvoiceData>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::Upload {
        status: e.status(),
        message: e.body_text(),
    })?;

    let file = upload::read_pdf_upload(multipart).await?;
    tracing::info!(filename = %file.filename, bytes = file.data.len(), "extracting invoice");

    let invoice = extract_invoice(state.pdf.clone(), state.model.as_ref(), file.data).await?;

    tracing::info!(filename = %file.filename, fields = invoice.len(), "extraction complete");
    Ok(Json(invoice))
}
