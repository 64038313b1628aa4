use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde_json::json;

use crate::models::choices;
use crate::models::client_asset::{self, ClientAssetDto, Entity as ClientAsset};
use crate::services::ServiceError;

fn validate_client_asset_dto(dto: &ClientAssetDto) -> Result<(), String> {
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

pub async fn list_client_assets(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match ClientAsset::find().all(&db).await {
        Ok(rows) => {
            let total = rows.len();
            Json(json!({ "client_assets": rows, "total": total })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn get_client_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match ClientAsset::find_by_id(id).one(&db).await {
        Ok(Some(row)) => Json(json!({ "client_asset": row })).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Client asset not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

// A dispatched record is closed for further editing: is_active = !is_dispatch.
pub async fn create_client_asset(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<ClientAssetDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_client_asset_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_row = client_asset::ActiveModel {
        client_name: Set(dto.client_name),
        project: Set(dto.project),
        project_owner: Set(dto.project_owner),
        employee_id: Set(dto.employee_id),
        asset_type_id: Set(dto.asset_type_id),
        asset_brand: Set(dto.asset_brand),
        configuration: Set(dto.configuration),
        ram: Set(dto.ram),
        ssd: Set(dto.ssd),
        processor: Set(dto.processor),
        operating_system: Set(dto.operating_system),
        storage: Set(dto.storage),
        serial_number: Set(dto.serial_number),
        is_dispatch: Set(dto.is_dispatch),
        date_of_dispatch: Set(dto.date_of_dispatch),
        description: Set(dto.description),
        is_active: Set(!dto.is_dispatch),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_row.insert(&db).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(json!({ "client_asset": model, "message": "Client asset created successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create client asset: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn update_client_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<ClientAssetDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_client_asset_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let row = match ClientAsset::find_by_id(id).one(&db).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Client asset not found" })),
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

    let mut active: client_asset::ActiveModel = row.into();
    active.client_name = Set(dto.client_name);
    active.project = Set(dto.project);
    active.project_owner = Set(dto.project_owner);
    active.employee_id = Set(dto.employee_id);
    active.asset_type_id = Set(dto.asset_type_id);
    active.asset_brand = Set(dto.asset_brand);
    active.configuration = Set(dto.configuration);
    active.ram = Set(dto.ram);
    active.ssd = Set(dto.ssd);
    active.processor = Set(dto.processor);
    active.operating_system = Set(dto.operating_system);
    active.storage = Set(dto.storage);
    active.serial_number = Set(dto.serial_number);
    active.is_dispatch = Set(dto.is_dispatch);
    active.date_of_dispatch = Set(dto.date_of_dispatch);
    active.description = Set(dto.description);
    active.is_active = Set(!dto.is_dispatch);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({ "client_asset": model, "message": "Client asset updated successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update client asset: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn delete_client_asset(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let row = match ClientAsset::find_by_id(id).one(&db).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Client asset not found" })),
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

    match row.delete(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Client asset deleted successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to delete client asset: {}", e) })),
        )
            .into_response(),
    }
}
