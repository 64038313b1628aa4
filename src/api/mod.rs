pub mod asset;
pub mod asset_type;
pub mod assignment;
pub mod auth;
pub mod client_asset;
pub mod dashboard;
pub mod employee;
pub mod health;
pub mod vendor;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::services::ServiceError;

/// Map a service failure onto the wire the same way everywhere.
pub(crate) fn service_error(e: ServiceError) -> (StatusCode, Json<Value>) {
    match e {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Record not found" })),
        ),
        ServiceError::AlreadyAssigned => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Asset is already assigned" })),
        ),
        ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))),
        ServiceError::Database(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", msg) })),
        ),
    }
}

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::create_admin))
        .route("/auth/password", put(auth::change_password))
        // Asset types
        .route(
            "/asset-types",
            get(asset_type::list_asset_types).post(asset_type::create_asset_type),
        )
        .route("/asset-types/:id", delete(asset_type::delete_asset_type))
        // Assets
        .route("/assets", get(asset::list_assets).post(asset::create_asset))
        .route(
            "/assets/:id",
            get(asset::get_asset)
                .put(asset::update_asset)
                .delete(asset::delete_asset),
        )
        // Vendors
        .route(
            "/vendors",
            get(vendor::list_vendors).post(vendor::create_vendor),
        )
        .route(
            "/vendors/:id",
            get(vendor::get_vendor)
                .put(vendor::update_vendor)
                .delete(vendor::delete_vendor),
        )
        .route("/vendors/:id/report", get(vendor::vendor_report))
        // Employees
        .route(
            "/employees",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route(
            "/employees/:id",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route("/employees/:id/details", get(employee::employee_details))
        // Assignments
        .route(
            "/assignments",
            get(assignment::list_assignments).post(assignment::create_assignments),
        )
        .route("/assignments/:id", put(assignment::reassign))
        .route(
            "/assignments/employee/:employee_id/asset/:asset_id",
            delete(assignment::unassign),
        )
        // Compatibility endpoint; the payload shape is frozen.
        .route(
            "/assignassets/count/:employee_email",
            get(assignment::assign_asset_count),
        )
        // Client assets
        .route(
            "/client-assets",
            get(client_asset::list_client_assets).post(client_asset::create_client_asset),
        )
        .route(
            "/client-assets/:id",
            get(client_asset::get_client_asset)
                .put(client_asset::update_client_asset)
                .delete(client_asset::delete_client_asset),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/remaining", get(dashboard::remaining_counts))
        .route(
            "/dashboard/assets/:type_name",
            get(dashboard::assets_by_type),
        )
        .route(
            "/dashboard/remaining/:type_name",
            get(dashboard::remaining_by_type),
        )
        .with_state(db)
}
