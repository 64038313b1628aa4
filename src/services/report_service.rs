//! Aggregation Reporter - read-side computations over the inventory.
//!
//! Every function here is idempotent and side-effect-free. No matching rows
//! is an empty result, never an error; only database failures propagate.

use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::asset::{self, Entity as Asset};
use crate::models::asset_type::Entity as AssetType;
use crate::models::assign_asset::{self, Entity as AssignAsset};
use crate::models::client_asset::Entity as ClientAsset;
use crate::models::employee::{self, Entity as Employee};
use crate::services::ServiceError;

/// Per-type sum of the `quantity` field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeTotal {
    pub asset_type: String,
    pub total_quantity: i64,
}

/// One physical-asset count per (type, brand) pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupedCount {
    pub asset_type: String,
    pub asset_brand: String,
    pub count: i64,
}

/// Type-level rollup row for the dashboard and vendor detail pages.
/// `asset_brand` is only populated for vendor-scoped rollups.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RollupRow {
    pub asset_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_brand: Option<String>,
    pub asset_price: f64,
    pub count: i64,
    pub remaining: i64,
}

/// Shape consumed by the `/assignassets/count/<email>` JSON endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmployeeAssetSummary {
    pub brand: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub ram: Option<String>,
    pub processor: Option<String>,
    pub operating_system: Option<String>,
    pub system_configuration: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounters {
    pub assigned_today: u64,
    pub assigned_yesterday: u64,
    pub total_assets: u64,
    pub total_employees: u64,
    pub total_client_assets: u64,
    pub total_remaining_assets: u64,
    pub total_price: f64,
    pub total_remaining_price: f64,
}

async fn type_names(db: &DatabaseConnection) -> Result<HashMap<i32, String>, ServiceError> {
    let types = AssetType::find().all(db).await?;
    Ok(types.into_iter().map(|t| (t.id, t.name)).collect())
}

/// Assets reordered brand-major: all rows of the first-seen brand, then the
/// next brand, and so on. The rollup and grouping outputs inherit this order.
fn brand_major(assets: &[asset::Model]) -> Vec<&asset::Model> {
    let mut brands: Vec<&str> = Vec::new();
    for a in assets {
        if !brands.contains(&a.asset_brand.as_str()) {
            brands.push(&a.asset_brand);
        }
    }
    let mut ordered = Vec::with_capacity(assets.len());
    for brand in brands {
        ordered.extend(assets.iter().filter(|a| a.asset_brand == brand));
    }
    ordered
}

/// Merge per-asset partials into type-level totals by linear scan.
/// O(n * types) is fine at the expected scale (well under 10^4 rows).
fn rollup_rows(
    assets: &[&asset::Model],
    types: &HashMap<i32, String>,
    with_brand: bool,
) -> Vec<RollupRow> {
    let mut result: Vec<RollupRow> = Vec::new();

    for a in assets {
        // Rows whose type was nulled out by a type deletion are skipped.
        let type_name = match a.asset_type_id.and_then(|id| types.get(&id)) {
            Some(name) => name.clone(),
            None => continue,
        };
        let remaining = if a.is_assign { 0 } else { 1 };

        if let Some(row) = result.iter_mut().find(|r| r.asset_type == type_name) {
            row.count += 1;
            row.asset_price += a.price;
            row.remaining += remaining;
        } else {
            result.push(RollupRow {
                asset_type: type_name,
                asset_brand: with_brand.then(|| a.asset_brand.clone()),
                asset_price: a.price,
                count: 1,
                remaining,
            });
        }
    }

    result
}

/// For every asset type, the sum of `quantity` across matching assets.
/// Types with no stock are omitted.
pub async fn totals_by_type(db: &DatabaseConnection) -> Result<Vec<TypeTotal>, ServiceError> {
    let types = AssetType::find().all(db).await?;
    let assets = Asset::find().all(db).await?;

    let mut totals = Vec::new();
    for t in types {
        let total: i64 = assets
            .iter()
            .filter(|a| a.asset_type_id == Some(t.id))
            .map(|a| a.quantity as i64)
            .sum();
        if total > 0 {
            totals.push(TypeTotal {
                asset_type: t.name,
                total_quantity: total,
            });
        }
    }
    Ok(totals)
}

/// Group assets by (type, brand), counting one per physical row - not by the
/// `quantity` field. `unassigned_only` restricts to remaining assets.
pub async fn grouped_counts(
    db: &DatabaseConnection,
    unassigned_only: bool,
) -> Result<Vec<GroupedCount>, ServiceError> {
    let mut query = Asset::find();
    if unassigned_only {
        query = query.filter(asset::Column::IsAssign.eq(false));
    }
    let assets = query.all(db).await?;
    let types = type_names(db).await?;

    let mut result: Vec<GroupedCount> = Vec::new();
    for a in brand_major(&assets) {
        let type_name = match a.asset_type_id.and_then(|id| types.get(&id)) {
            Some(name) => name.clone(),
            None => continue,
        };
        if let Some(row) = result
            .iter_mut()
            .find(|r| r.asset_type == type_name && r.asset_brand == a.asset_brand)
        {
            row.count += 1;
        } else {
            result.push(GroupedCount {
                asset_type: type_name,
                asset_brand: a.asset_brand.clone(),
                count: 1,
            });
        }
    }
    Ok(result)
}

/// Dashboard rollup: per-type asset count, price total and remaining
/// (unassigned) count, accumulated brand by brand.
pub async fn dashboard_rollup(db: &DatabaseConnection) -> Result<Vec<RollupRow>, ServiceError> {
    let assets = Asset::find().all(db).await?;
    let types = type_names(db).await?;
    Ok(rollup_rows(&brand_major(&assets), &types, false))
}

/// The dashboard rollup restricted to one vendor's assets.
pub async fn vendor_rollup(
    db: &DatabaseConnection,
    vendor_id: i32,
) -> Result<Vec<RollupRow>, ServiceError> {
    let assets = Asset::find()
        .filter(asset::Column::VendorId.eq(vendor_id))
        .all(db)
        .await?;
    let types = type_names(db).await?;
    Ok(rollup_rows(&brand_major(&assets), &types, true))
}

/// Spec lines for every asset currently held by the employee with this email.
pub async fn employee_asset_summary(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Vec<EmployeeAssetSummary>, ServiceError> {
    let employee = match Employee::find()
        .filter(employee::Column::Email.eq(email))
        .one(db)
        .await?
    {
        Some(e) => e,
        None => return Ok(Vec::new()),
    };

    let links = AssignAsset::find()
        .filter(assign_asset::Column::EmployeeId.eq(employee.id))
        .all(db)
        .await?;

    let types = type_names(db).await?;

    let mut summaries = Vec::new();
    for link in links {
        if let Some(a) = Asset::find_by_id(link.asset_id).one(db).await? {
            let type_name = a
                .asset_type_id
                .and_then(|id| types.get(&id).cloned())
                .unwrap_or_default();
            summaries.push(EmployeeAssetSummary {
                brand: a.asset_brand,
                asset_type: type_name,
                ram: a.ram,
                processor: a.processor,
                operating_system: a.operating_system,
                system_configuration: a.system_configuration,
            });
        }
    }
    Ok(summaries)
}

/// Count assignments created on a given day (`YYYY-MM-DD`).
pub async fn assigned_on(db: &DatabaseConnection, date: &str) -> Result<u64, ServiceError> {
    let count = AssignAsset::find()
        .filter(assign_asset::Column::CreatedAt.starts_with(date))
        .count(db)
        .await?;
    Ok(count)
}

/// Headline counters for the dashboard page.
pub async fn dashboard_counters(
    db: &DatabaseConnection,
) -> Result<DashboardCounters, ServiceError> {
    let today = chrono::Utc::now().date_naive();
    let yesterday = today - chrono::Duration::days(1);

    let assets = Asset::find().all(db).await?;
    let total_price: f64 = assets.iter().map(|a| a.price).sum();
    let total_remaining_price: f64 = assets
        .iter()
        .filter(|a| !a.is_assign)
        .map(|a| a.price)
        .sum();
    let total_remaining_assets = assets.iter().filter(|a| !a.is_assign).count() as u64;
    let total_assets = assets.len() as u64;

    Ok(DashboardCounters {
        assigned_today: assigned_on(db, &today.to_string()).await?,
        assigned_yesterday: assigned_on(db, &yesterday.to_string()).await?,
        total_assets,
        total_employees: Employee::find().count(db).await?,
        total_client_assets: ClientAsset::find().count(db).await?,
        total_remaining_assets,
        total_price,
        total_remaining_price,
    })
}
