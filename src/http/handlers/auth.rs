use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;

use crate::http::types::LoginRequest;
use crate::service::{LoginOutcome, RecordService};

/// Always responds 200; a wrong password is a negative result, not an error.
pub async fn handle_login(
    Extension(service): Extension<Arc<RecordService>>,
    Json(req): Json<LoginRequest>,
) -> Json<LoginOutcome> {
    let outcome = service.check_admin_password(&req.password);
    if !outcome.success {
        tracing::warn!("failed admin login attempt");
    }
    Json(outcome)
}
