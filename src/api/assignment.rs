use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::models::asset::{self, Entity as Asset};
use crate::models::asset_type::Entity as AssetType;
use crate::models::assign_asset::Entity as AssignAsset;
use crate::models::employee::Entity as Employee;
use crate::services::{assignment_service, report_service};

/// List assignments enriched with employee name and asset label.
pub async fn list_assignments(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let links_with_employees = match AssignAsset::find()
        .find_also_related(Employee)
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
    };

    let asset_ids: Vec<i32> = links_with_employees.iter().map(|(l, _)| l.asset_id).collect();

    let mut asset_map: HashMap<i32, (asset::Model, Option<String>)> = HashMap::new();
    if !asset_ids.is_empty() {
        let assets_with_types = match Asset::find()
            .filter(asset::Column::Id.is_in(asset_ids))
            .find_also_related(AssetType)
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
        };
        for (a, t) in assets_with_types {
            asset_map.insert(a.id, (a, t.map(|t| t.name)));
        }
    }

    let result: Vec<serde_json::Value> = links_with_employees
        .into_iter()
        .map(|(link, employee)| {
            let employee_name = employee
                .as_ref()
                .map(|e| {
                    format!(
                        "{} {}",
                        e.first_name.clone().unwrap_or_default(),
                        e.last_name.clone().unwrap_or_default()
                    )
                    .trim()
                    .to_string()
                })
                .unwrap_or_else(|| "Unknown".to_string());
            let (asset_brand, asset_type_name) = asset_map
                .get(&link.asset_id)
                .map(|(a, t)| (a.asset_brand.clone(), t.clone()))
                .unwrap_or(("Unknown".to_string(), None));

            json!({
                "id": link.id,
                "employee_id": link.employee_id,
                "asset_id": link.asset_id,
                "date_of_assign": link.date_of_assign,
                "employee_name": employee_name,
                "asset_brand": asset_brand,
                "asset_type": asset_type_name,
            })
        })
        .collect();

    let total = result.len();
    Json(json!({ "assignments": result, "total": total })).into_response()
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub employee_id: i32,
    pub asset_ids: Vec<i32>,
    pub date_of_assign: Option<String>,
}

/// Batch assign. The whole list is processed; the response reports which
/// assets were assigned, which were already claimed and which don't exist.
pub async fn create_assignments(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<AssignRequest>,
) -> impl IntoResponse {
    if payload.asset_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "asset_ids must not be empty" })),
        )
            .into_response();
    }

    match assignment_service::assign(
        &db,
        payload.employee_id,
        &payload.asset_ids,
        payload.date_of_assign,
    )
    .await
    {
        Ok(outcome) => {
            let status = if outcome.assigned.is_empty() {
                StatusCode::CONFLICT
            } else {
                StatusCode::CREATED
            };
            (
                status,
                Json(json!({
                    "assigned": outcome.assigned,
                    "already_assigned": outcome.already_assigned,
                    "missing": outcome.missing,
                    "message": format!("{} asset(s) assigned", outcome.assigned.len()),
                })),
            )
                .into_response()
        }
        Err(e) => crate::api::service_error(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct ReassignRequest {
    pub employee_id: i32,
    pub asset_id: i32,
    pub date_of_assign: Option<String>,
}

pub async fn reassign(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ReassignRequest>,
) -> impl IntoResponse {
    match assignment_service::reassign(
        &db,
        id,
        payload.employee_id,
        payload.asset_id,
        payload.date_of_assign,
    )
    .await
    {
        Ok(link) => (
            StatusCode::OK,
            Json(json!({ "assignment": link, "message": "Assignment updated successfully" })),
        )
            .into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}

pub async fn unassign(
    State(db): State<DatabaseConnection>,
    Path((employee_id, asset_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    match assignment_service::unassign(&db, employee_id, asset_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Assigned asset deleted successfully" })),
        )
            .into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}

/// `GET /assignassets/count/<employee-email>` - the payload shape is frozen
/// for an external consumer.
pub async fn assign_asset_count(
    State(db): State<DatabaseConnection>,
    Path(employee_email): Path<String>,
) -> impl IntoResponse {
    match report_service::employee_asset_summary(&db, &employee_email).await {
        Ok(summaries) => Json(json!({ "assets_dict": summaries })).into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}
