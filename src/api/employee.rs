use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::*;
use serde_json::json;

use crate::models::assign_asset::{self, Entity as AssignAsset};
use crate::models::choices::{self, validate_mobile_number};
use crate::models::client_asset::{self, Entity as ClientAsset};
use crate::models::employee::{self, Entity as Employee, EmployeeDto};
use crate::services::{assignment_service, ServiceError};

fn validate_employee_dto(dto: &EmployeeDto) -> Result<(), String> {
    validate_mobile_number(&dto.mobile_number)?;
    choices::validate_choice("technology", dto.technology.as_deref(), choices::TECHNOLOGY)?;
    Ok(())
}

pub async fn list_employees(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Employee::find()
        .filter(employee::Column::IsActive.eq(true))
        .all(&db)
        .await
    {
        Ok(employees) => {
            let total = employees.len();
            Json(json!({ "employees": employees, "total": total })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn get_employee(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Employee::find_by_id(id).one(&db).await {
        Ok(Some(e)) => Json(json!({ "employee": e })).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Employee not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

pub async fn create_employee(
    State(db): State<DatabaseConnection>,
    Json(dto): Json<EmployeeDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_employee_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let badge = match &dto.employee_id {
        Some(b) if !b.trim().is_empty() => b.trim().to_string(),
        _ => {
            return crate::api::service_error(ServiceError::Validation(
                "employee_id is required".to_string(),
            ))
            .into_response()
        }
    };

    let taken = Employee::find()
        .filter(
            Condition::any()
                .add(employee::Column::Email.eq(&dto.email))
                .add(employee::Column::EmployeeId.eq(&badge)),
        )
        .one(&db)
        .await
        .unwrap_or(None);
    if taken.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "An employee with this email or employee id already exists" })),
        )
            .into_response();
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_employee = employee::ActiveModel {
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email),
        employee_id: Set(badge),
        date_of_joining: Set(dto.date_of_joining),
        mobile_number: Set(dto.mobile_number),
        technology: Set(dto.technology),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_employee.insert(&db).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(json!({ "employee": model, "message": "Employee created successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create employee: {}", e) })),
        )
            .into_response(),
    }
}

// The badge number (employee_id) is immutable; incoming values are ignored.
pub async fn update_employee(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(dto): Json<EmployeeDto>,
) -> impl IntoResponse {
    if let Err(msg) = validate_employee_dto(&dto) {
        return crate::api::service_error(ServiceError::Validation(msg)).into_response();
    }

    let emp = match Employee::find_by_id(id).one(&db).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Employee not found" })),
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

    let email_taken = Employee::find()
        .filter(employee::Column::Email.eq(&dto.email))
        .filter(employee::Column::Id.ne(id))
        .one(&db)
        .await
        .unwrap_or(None);
    if email_taken.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "An employee with this email already exists" })),
        )
            .into_response();
    }

    let mut active: employee::ActiveModel = emp.into();
    active.first_name = Set(dto.first_name);
    active.last_name = Set(dto.last_name);
    active.email = Set(dto.email);
    active.date_of_joining = Set(dto.date_of_joining);
    active.mobile_number = Set(dto.mobile_number);
    active.technology = Set(dto.technology);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({ "employee": model, "message": "Employee updated successfully" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update employee: {}", e) })),
        )
            .into_response(),
    }
}

// Every asset the employee holds is released before the employee row goes,
// in the same transaction.
pub async fn delete_employee(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let emp = match Employee::find_by_id(id).one(&db).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Employee not found" })),
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
        let released = assignment_service::release_for_employee(&txn, id).await?;
        emp.delete(&txn)
            .await
            .map_err(crate::services::ServiceError::from)?;
        txn.commit()
            .await
            .map_err(crate::services::ServiceError::from)?;
        Ok::<u64, crate::services::ServiceError>(released)
    }
    .await;

    match result {
        Ok(released) => (
            StatusCode::OK,
            Json(json!({
                "message": "Employee deleted successfully",
                "released_assets": released
            })),
        )
            .into_response(),
        Err(e) => crate::api::service_error(e).into_response(),
    }
}

/// Employee detail page: held assets and client-asset dispatch records.
pub async fn employee_details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let emp = match Employee::find_by_id(id).one(&db).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Employee not found" })),
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

    let assignments = AssignAsset::find()
        .filter(assign_asset::Column::EmployeeId.eq(id))
        .all(&db)
        .await
        .unwrap_or_default();

    let client_assets = ClientAsset::find()
        .filter(client_asset::Column::EmployeeId.eq(id))
        .all(&db)
        .await
        .unwrap_or_default();

    Json(json!({
        "employee": emp,
        "assignments": assignments,
        "client_assets": client_assets,
    }))
    .into_response()
}
