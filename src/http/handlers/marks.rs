use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;

use crate::http::error::ApiError;
use crate::http::types::{AddMarksRequest, RollNoQuery};
use crate::service::{MarkEntry, RecordService};

pub async fn handle_add_marks(
    Extension(service): Extension<Arc<RecordService>>,
    Json(req): Json<AddMarksRequest>,
) -> Result<String, ApiError> {
    let written = service.upsert_marks(&req.roll_no, &req.entries)?;
    tracing::info!(
        "marks upserted: roll no. {}, {} entries",
        req.roll_no.trim(),
        written
    );
    Ok(format!(
        "Marks have been added/updated for roll no. = {}",
        req.roll_no.trim()
    ))
}

pub async fn handle_get_marks(
    Extension(service): Extension<Arc<RecordService>>,
    Query(query): Query<RollNoQuery>,
) -> Result<Json<Vec<MarkEntry>>, ApiError> {
    let rows = service.marks_for(&query.roll_no)?;
    Ok(Json(rows))
}
