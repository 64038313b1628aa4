use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::models::asset::{self, Entity as Asset};
use crate::models::asset_type::{self, Entity as AssetTypeEntity};
use crate::models::client_asset::{self, Entity as ClientAsset};
use crate::services::ServiceError;

pub async fn list_asset_types(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match AssetTypeEntity::find().all(&db).await {
        Ok(types) => {
            let total = types.len();
            Json(json!({ "asset_types": types, "total": total })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct AssetTypeDto {
    pub name: String,
}

pub async fn create_asset_type(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<AssetTypeDto>,
) -> impl IntoResponse {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return crate::api::service_error(ServiceError::Validation(
            "Asset type name must not be empty".to_string(),
        ))
        .into_response();
    }

    let exists = AssetTypeEntity::find()
        .filter(asset_type::Column::Name.eq(&name))
        .one(&db)
        .await
        .unwrap_or(None);
    if exists.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "This asset type already exists" })),
        )
            .into_response();
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_type = asset_type::ActiveModel {
        name: Set(name),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_type.insert(&db).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(json!({ "asset_type": model, "message": "Asset type created successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create asset type: {}", e) })),
        )
            .into_response(),
    }
}

// Deleting a type detaches referencing assets and client assets (set-null)
// before removing the row, all in one transaction.
pub async fn delete_asset_type(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let asset_type = match AssetTypeEntity::find_by_id(id).one(&db).await {
        Ok(Some(t)) => t,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Asset type not found" })),
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
        let txn = db.begin().await?;
        Asset::update_many()
            .col_expr(
                asset::Column::AssetTypeId,
                sea_orm::sea_query::Expr::value(Value::Int(None)),
            )
            .filter(asset::Column::AssetTypeId.eq(id))
            .exec(&txn)
            .await?;
        ClientAsset::update_many()
            .col_expr(
                client_asset::Column::AssetTypeId,
                sea_orm::sea_query::Expr::value(Value::Int(None)),
            )
            .filter(client_asset::Column::AssetTypeId.eq(id))
            .exec(&txn)
            .await?;
        asset_type.delete(&txn).await?;
        txn.commit().await
    }
    .await;

    match result {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Asset type deleted successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to delete asset type: {}", e) })),
        )
            .into_response(),
    }
}
