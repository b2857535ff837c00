use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::service::RecordService;

/// Builds the route table over a shared record service.
pub fn router(service: Arc<RecordService>) -> Router {
    Router::new()
        .route("/add", post(handlers::students::handle_add))
        .route("/view", get(handlers::students::handle_view))
        .route("/modify", post(handlers::students::handle_modify))
        .route("/delete", post(handlers::students::handle_delete))
        .route("/students", get(handlers::students::handle_list))
        .route("/add-marks", post(handlers::marks::handle_add_marks))
        .route("/marks", get(handlers::marks::handle_get_marks))
        .route("/login", post(handlers::auth::handle_login))
        .layer(Extension(service))
}
