use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde_json::json;

use crate::models::asset::{self, Entity as Asset};
use crate::models::assign_asset::{self, Entity as AssignAsset};
use crate::models::choices::validate_mobile_number;
use crate::models::vendor::{self, Entity as Vendor, VendorDto};
use crate::services::{report_service, ServiceError};

pub async fn list_vendors(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Vendor::find()
        .filter(vendor::Column::IsActive.eq(true))
        .order_by_asc(vendor::Column::CreatedAt)
        .all(&db)
        .await
    {
        Ok(vendors) => {
            let total = vendors.len();
            Json(json!({ "vendors": vendors, "total": total })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn get_vendor(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Vendor::find_by_id(id).one(&db).await {
        Ok(Some(v)) => Json(json!({ "vendor": v })).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Vendor not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn create_vendor(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<VendorDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_mobile_number(&dto.mobile_number) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let exists = Vendor::find()
        .filter(vendor::Column::Email.eq(&dto.email))
        .one(&db)
        .await
        .unwrap_or(None);
    if exists.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "A vendor with this email already exists" })),
        )
            .into_response();
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_vendor = vendor::ActiveModel {
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email),
        mobile_number: Set(dto.mobile_number),
        address: Set(dto.address),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_vendor.insert(&db).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(json!({ "vendor": model, "message": "Vendor created successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create vendor: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn update_vendor(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<VendorDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_mobile_number(&dto.mobile_number) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let vendor = match Vendor::find_by_id(id).one(&db).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Vendor not found" })),
            )
                .into_response()
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response()
        }
    };

    let email_taken = Vendor::find()
        .filter(vendor::Column::Email.eq(&dto.email))
        .filter(vendor::Column::Id.ne(id))
        .one(&db)
        .await
        .unwrap_or(None);
    if email_taken.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "A vendor with this email already exists" })),
        )
            .into_response();
    }

    let mut active: vendor::ActiveModel = vendor.into();
    active.first_name = Set(dto.first_name);
    active.last_name = Set(dto.last_name);
    active.email = Set(dto.email);
    active.mobile_number = Set(dto.mobile_number);
    active.address = Set(dto.address);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({ "vendor": model, "message": "Vendor updated successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update vendor: {}", e) })),
        )
            .into_response(),
    }
}

// Vendors are deactivated, never removed; their assets keep pointing at them.
pub async fn delete_vendor(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let vendor = match Vendor::find_by_id(id).one(&db).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Vendor not found" })),
            )
                .into_response()
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response()
        }
    };

    let mut active: vendor::ActiveModel = vendor.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Vendor deleted successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to delete vendor: {}", e) })),
        )
            .into_response(),
    }
}

/// Vendor detail page: the vendor, their assets, the assignments on the
/// assigned ones, and the per-type rollup scoped to this vendor.
pub async fn vendor_report(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let vendor = match Vendor::find_by_id(id).one(&db).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Vendor not found" })),
            )
                .into_response()
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response()
        }
    };

    let vendor_assets = match Asset::find()
        .filter(asset::Column::VendorId.eq(id))
        .all(&db)
        .await
    {
        Ok(a) => a,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response()
        }
    };

    let assigned_ids: Vec<i32> = vendor_assets
        .iter()
        .filter(|a| a.is_assign)
        .map(|a| a.id)
        .collect();

    let assignments = if assigned_ids.is_empty() {
        Vec::new()
    } else {
        match AssignAsset::find()
            .filter(assign_asset::Column::AssetId.is_in(assigned_ids))
            .all(&db)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": format!("Database error: {}", e) })),
                )
                    .into_response()
            }
        }
    };

    let rollup = match report_service::vendor_rollup(&db, id).await {
        Ok(r) => r,
        Err(e) => return crate::api::service_error(e).into_response(),
    };

    Json(json!({
        "vendor": vendor,
        "vendor_assets": vendor_assets,
        "assignments": assignments,
        "output": rollup,
    }))
    .into_response()
}
