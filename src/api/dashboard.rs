use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde_json::json;

use crate::models::asset::{self, Entity as Asset};
use crate::models::asset_type::{self, Entity as AssetType};
use crate::services::report_service;

/// The dashboard page: headline counters, per-type rollup, per-type stock
/// totals and the remaining (unassigned) grouped counts.
pub async fn dashboard(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let counters = match report_service::dashboard_counters(&db).await {
        Ok(c) => c,
        Err(e) => return crate::api::service_error(e).into_response(),
    };
    let rollup = match report_service::dashboard_rollup(&db).await {
        Ok(r) => r,
        Err(e) => return crate::api::service_error(e).into_response(),
    };
    let totals = match report_service::totals_by_type(&db).await {
        Ok(t) => t,
        Err(e) => return crate::api::service_error(e).into_response(),
    };
    let remaining = match report_service::grouped_counts(&db, true).await {
        Ok(r) => r,
        Err(e) => return crate::api::service_error(e).into_response(),
    };

    Json(json!({
        "counters": counters,
        "asset_type_query": rollup,
        "asset_totals": totals,
        "remaining_assets": remaining,
    }))
    .into_response()
}

/// Grouped (type, brand) counts of unassigned assets.
pub async fn remaining_counts(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match report_service::grouped_counts(&db, true).await {
        Ok(rows) => Json(json!({ "remaining_assets": rows })).into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}

async fn assets_of_type(
    db: &DatabaseConnection,
    type_name: &str,
    unassigned_only: bool,
) -> Result<Vec<asset::Model>, DbErr> {
    let asset_type = AssetType::find()
        .filter(asset_type::Column::Name.eq(type_name))
        .one(db)
        .await?;

    let Some(asset_type) = asset_type else {
        return Ok(Vec::new());
    };

    let mut query = Asset::find().filter(asset::Column::AssetTypeId.eq(asset_type.id));
    if unassigned_only {
        query = query.filter(asset::Column::IsAssign.eq(false));
    }
    query.all(db).await
}

/// Drill-down from a dashboard row: all assets of one type.
pub async fn assets_by_type(
    State(db): State<DatabaseConnection>,
    Path(type_name): Path<String>,
) -> impl IntoResponse {
    match assets_of_type(&db, &type_name, false).await {
        Ok(rows) => Json(json!({ "asset_details": rows })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

/// Drill-down restricted to the unassigned assets of one type.
pub async fn remaining_by_type(
    State(db): State<DatabaseConnection>,
    Path(type_name): Path<String>,
) -> impl IntoResponse {
    match assets_of_type(&db, &type_name, true).await {
        Ok(rows) => Json(json!({ "asset_details": rows })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}
