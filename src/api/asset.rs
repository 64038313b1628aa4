use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::models::asset::{self, AssetDto, Entity as Asset};
use crate::models::asset_type::Entity as AssetType;
use crate::models::choices;
use crate::services::{assignment_service, ServiceError};

fn validate_asset_dto(dto: &AssetDto) -> Result<(), String> {
    choices::validate_required_choice("payment status", &dto.payment_status, choices::PAYMENT_STATUS)?;
    choices::validate_required_choice("invoice status", &dto.invoice, choices::INVOICE)?;
    choices::validate_choice("ram", dto.ram.as_deref(), choices::RAM)?;
    choices::validate_choice("ssd", dto.ssd.as_deref(), choices::SSD)?;
    choices::validate_choice("processor", dto.processor.as_deref(), choices::PROCESSOR)?;
    choices::validate_choice(
        "operating system",
        dto.operating_system.as_deref(),
        choices::OPERATING_SYSTEM,
    )?;
    choices::validate_choice("storage", dto.storage.as_deref(), choices::STORAGE)?;
    Ok(())
}

/// Payment date is derived, never submitted: stamped when payment is done.
fn payment_date_for(payment_status: &str) -> Option<String> {
    if payment_status == "done" {
        Some(chrono::Utc::now().to_rfc3339())
    } else {
        Some("---".to_string())
    }
}

#[derive(Deserialize)]
pub struct AssetsQuery {
    /// Filter by asset type name (substring match).
    pub r#type: Option<String>,
}

pub async fn list_assets(
    State(db): State<DatabaseConnection>,
    Query(params): Query<AssetsQuery>,
) -> impl IntoResponse {
    let assets_with_types = match Asset::find().find_also_related(AssetType).all(&db).await {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response()
        }
    };

    let rows: Vec<serde_json::Value> = assets_with_types
        .into_iter()
        .filter(|(_, t)| match (&params.r#type, t) {
            (Some(wanted), Some(t)) => t.name.to_lowercase().contains(&wanted.to_lowercase()),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .map(|(a, t)| {
            let type_name = t.map(|t| t.name);
            json!({ "asset": a, "asset_type_name": type_name })
        })
        .collect();

    let total = rows.len();
    Json(json!({ "assets": rows, "total": total })).into_response()
}

pub async fn get_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Asset::find_by_id(id).find_also_related(AssetType).one(&db).await {
        Ok(Some((a, t))) => {
            Json(json!({ "asset": a, "asset_type_name": t.map(|t| t.name) })).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Asset not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn create_asset(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<AssetDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_asset_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_asset = asset::ActiveModel {
        asset_type_id: Set(dto.asset_type_id),
        asset_brand: Set(dto.asset_brand),
        price: Set(dto.price),
        vendor_id: Set(dto.vendor_id),
        quantity: Set(dto.quantity),
        payment_date: Set(payment_date_for(&dto.payment_status)),
        payment_status: Set(dto.payment_status),
        invoice: Set(dto.invoice),
        purchase_date: Set(dto.purchase_date),
        system_configuration: Set(dto.system_configuration),
        ram: Set(dto.ram),
        ssd: Set(dto.ssd),
        processor: Set(dto.processor),
        operating_system: Set(dto.operating_system),
        storage: Set(dto.storage),
        serial_number: Set(dto.serial_number),
        invoice_number: Set(dto.invoice_number),
        is_assign: Set(false),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_asset.insert(&db).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(json!({ "asset": model, "message": "Asset successfully created" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create asset: {}", e) })),
        )
            .into_response(),
    }
}

// Updates never touch is_assign; that flag belongs to the assignment engine.
pub async fn update_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<AssetDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_asset_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let asset = match Asset::find_by_id(id).one(&db).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Asset not found" })),
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

    let mut active: asset::ActiveModel = asset.into();
    active.asset_type_id = Set(dto.asset_type_id);
    active.asset_brand = Set(dto.asset_brand);
    active.price = Set(dto.price);
    active.vendor_id = Set(dto.vendor_id);
    active.quantity = Set(dto.quantity);
    active.payment_date = Set(payment_date_for(&dto.payment_status));
    active.payment_status = Set(dto.payment_status);
    active.invoice = Set(dto.invoice);
    active.purchase_date = Set(dto.purchase_date);
    active.system_configuration = Set(dto.system_configuration);
    active.ram = Set(dto.ram);
    active.ssd = Set(dto.ssd);
    active.processor = Set(dto.processor);
    active.operating_system = Set(dto.operating_system);
    active.storage = Set(dto.storage);
    active.serial_number = Set(dto.serial_number);
    active.invoice_number = Set(dto.invoice_number);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({ "asset": model, "message": "Asset updated successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update asset: {}", e) })),
        )
            .into_response(),
    }
}

// Deleting an asset first removes any assignment link referencing it, so no
// orphaned link rows survive.
pub async fn delete_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let asset = match Asset::find_by_id(id).one(&db).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Asset not found" })),
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

    let result = async {
        let txn = db.begin().await.map_err(crate::services::ServiceError::from)?;
        assignment_service::release_for_asset(&txn, id).await?;
        asset
            .delete(&txn)
            .await
            .map_err(crate::services::ServiceError::from)?;
        txn.commit()
            .await
            .map_err(crate::services::ServiceError::from)
    }
    .await;

    match result {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Asset deleted successfully" })),
        )
            .into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}
