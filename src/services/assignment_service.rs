//! Assignment Engine - the only code path allowed to mutate `Asset.is_assign`
//! or touch `assign_assets` rows.
//!
//! Every write runs inside one transaction so the flag flip and the link-row
//! mutation land together or not at all. The unique index on
//! `assign_assets.asset_id` backs up the in-transaction existence check when
//! two requests race for the same asset.

use sea_orm::*;

use crate::models::asset::{self, Entity as Asset};
use crate::models::assign_asset::{self, Entity as AssignAsset};
use crate::models::employee::Entity as Employee;
use crate::services::ServiceError;

/// Per-asset outcome of a batch assign.
#[derive(Debug, Default, PartialEq)]
pub struct AssignOutcome {
    pub assigned: Vec<i32>,
    pub already_assigned: Vec<i32>,
    pub missing: Vec<i32>,
}

/// Assign a batch of assets to one employee.
///
/// Processes the whole batch and reports a per-asset outcome instead of
/// stopping at the first success; a conflict on one asset does not abandon
/// the rest of the request.
pub async fn assign(
    db: &DatabaseConnection,
    employee_id: i32,
    asset_ids: &[i32],
    date_of_assign: Option<String>,
) -> Result<AssignOutcome, ServiceError> {
    let txn = db.begin().await?;

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let now = chrono::Utc::now().to_rfc3339();
    let mut outcome = AssignOutcome::default();

    for &asset_id in asset_ids {
        let asset = match Asset::find_by_id(asset_id).one(&txn).await? {
            Some(a) => a,
            None => {
                outcome.missing.push(asset_id);
                continue;
            }
        };

        // Claimed by anyone, not just this employee.
        let claimed = AssignAsset::find()
            .filter(assign_asset::Column::AssetId.eq(asset_id))
            .one(&txn)
            .await?
            .is_some();

        if claimed {
            outcome.already_assigned.push(asset_id);
            continue;
        }

        let link = assign_asset::ActiveModel {
            employee_id: Set(employee_id),
            asset_id: Set(asset_id),
            date_of_assign: Set(date_of_assign.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        link.insert(&txn).await?;

        let mut asset_active: asset::ActiveModel = asset.into();
        asset_active.is_assign = Set(true);
        asset_active.updated_at = Set(now.clone());
        asset_active.update(&txn).await?;

        outcome.assigned.push(asset_id);
    }

    txn.commit().await?;
    Ok(outcome)
}

/// Move an existing assignment to a new employee and/or asset.
///
/// Releases the previously held asset before claiming the new one, so no
/// asset is left stranded with `is_assign = true`.
pub async fn reassign(
    db: &DatabaseConnection,
    assignment_id: i32,
    employee_id: i32,
    asset_id: i32,
    date_of_assign: Option<String>,
) -> Result<assign_asset::Model, ServiceError> {
    let txn = db.begin().await?;

    let link = AssignAsset::find_by_id(assignment_id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let new_asset = Asset::find_by_id(asset_id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    // Claimed by a different assignment row.
    let claimed_elsewhere = AssignAsset::find()
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .filter(assign_asset::Column::Id.ne(assignment_id))
        .one(&txn)
        .await?
        .is_some();

    if claimed_elsewhere {
        return Err(ServiceError::AlreadyAssigned);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let old_asset_id = link.asset_id;

    if old_asset_id != asset_id {
        if let Some(old_asset) = Asset::find_by_id(old_asset_id).one(&txn).await? {
            let mut old_active: asset::ActiveModel = old_asset.into();
            old_active.is_assign = Set(false);
            old_active.updated_at = Set(now.clone());
            old_active.update(&txn).await?;
        }
    }

    let mut link_active: assign_asset::ActiveModel = link.into();
    link_active.employee_id = Set(employee_id);
    link_active.asset_id = Set(asset_id);
    link_active.date_of_assign = Set(date_of_assign);
    link_active.updated_at = Set(now.clone());
    let updated = link_active.update(&txn).await?;

    let mut asset_active: asset::ActiveModel = new_asset.into();
    asset_active.is_assign = Set(true);
    asset_active.updated_at = Set(now);
    asset_active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Release one asset held by one employee.
pub async fn unassign(
    db: &DatabaseConnection,
    employee_id: i32,
    asset_id: i32,
) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    let link = AssignAsset::find()
        .filter(assign_asset::Column::EmployeeId.eq(employee_id))
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    if let Some(asset) = Asset::find_by_id(link.asset_id).one(&txn).await? {
        let mut asset_active: asset::ActiveModel = asset.into();
        asset_active.is_assign = Set(false);
        asset_active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        asset_active.update(&txn).await?;
    }

    link.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Release every asset an employee holds. Called before deleting the
/// employee row, inside the caller's transaction. Iterates every link row;
/// an employee can hold more than one asset.
pub async fn release_for_employee<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
) -> Result<u64, ServiceError> {
    let links = AssignAsset::find()
        .filter(assign_asset::Column::EmployeeId.eq(employee_id))
        .all(conn)
        .await?;

    let now = chrono::Utc::now().to_rfc3339();
    let released = links.len() as u64;

    for link in links {
        if let Some(asset) = Asset::find_by_id(link.asset_id).one(conn).await? {
            let mut asset_active: asset::ActiveModel = asset.into();
            asset_active.is_assign = Set(false);
            asset_active.updated_at = Set(now.clone());
            asset_active.update(conn).await?;
        }
        link.delete(conn).await?;
    }

    Ok(released)
}

/// Delete any link row referencing an asset. Called before deleting the
/// asset row, inside the caller's transaction, so no orphaned assignment
/// records survive.
pub async fn release_for_asset<C: ConnectionTrait>(
    conn: &C,
    asset_id: i32,
) -> Result<u64, ServiceError> {
    let res = AssignAsset::delete_many()
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
