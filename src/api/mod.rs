//! HTTP handlers and routing

pub mod categories;
pub mod health;
pub mod instances;

use axum::{response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// The hidden id on a delete form must match the path, when sent
fn check_hidden_id(path_id: i32, form_id: Option<i32>) -> Result<(), AppError> {
    match form_id {
        Some(form_id) if form_id != path_id => Err(AppError::BadRequest(format!(
            "Form id {} does not match {}",
            form_id, path_id
        ))),
        _ => Ok(()),
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/instances") }))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Book instances
        .route("/instances", get(instances::list_instances))
        .route(
            "/instances/create",
            get(instances::create_instance_form).post(instances::create_instance),
        )
        .route("/instances/:id", get(instances::instance_detail))
        .route(
            "/instances/:id/delete",
            get(instances::delete_instance_form).post(instances::delete_instance),
        )
        .route(
            "/instances/:id/update",
            get(instances::update_instance_form).post(instances::update_instance),
        )
        // Categories
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/create",
            get(categories::create_category_form).post(categories::create_category),
        )
        .route("/categories/:id", get(categories::category_detail))
        .route(
            "/categories/:id/delete",
            get(categories::delete_category_form).post(categories::delete_category),
        )
        .route(
            "/categories/:id/update",
            get(categories::update_category_form).post(categories::update_category),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
