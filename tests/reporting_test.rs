use assetdesk::models::{asset, asset_type, client_asset, employee, vendor};
use assetdesk::services::{assignment_service, report_service};
use assetdesk::{api, db};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::json;
use tower::ServiceExt;

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_asset_type(db: &DatabaseConnection, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let row = asset_type::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = asset_type::Entity::insert(row)
        .exec(db)
        .await
        .expect("Failed to create asset type");
    res.last_insert_id
}

async fn create_test_employee(db: &DatabaseConnection, email: &str, badge: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let row = employee::ActiveModel {
        first_name: Set(Some("Test".to_string())),
        last_name: Set(Some("Employee".to_string())),
        email: Set(email.to_string()),
        employee_id: Set(badge.to_string()),
        mobile_number: Set("9876543210".to_string()),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = employee::Entity::insert(row)
        .exec(db)
        .await
        .expect("Failed to create employee");
    res.last_insert_id
}

async fn create_test_vendor(db: &DatabaseConnection, email: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let row = vendor::ActiveModel {
        first_name: Set(Some("Supply".to_string())),
        last_name: Set(Some("Co".to_string())),
        email: Set(email.to_string()),
        mobile_number: Set("9876500000".to_string()),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = vendor::Entity::insert(row)
        .exec(db)
        .await
        .expect("Failed to create vendor");
    res.last_insert_id
}

struct AssetSpec<'a> {
    type_id: Option<i32>,
    brand: &'a str,
    price: f64,
    quantity: i32,
    vendor_id: Option<i32>,
}

async fn create_test_asset(db: &DatabaseConnection, spec: AssetSpec<'_>) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let row = asset::ActiveModel {
        asset_type_id: Set(spec.type_id),
        asset_brand: Set(spec.brand.to_string()),
        price: Set(spec.price),
        vendor_id: Set(spec.vendor_id),
        quantity: Set(spec.quantity),
        payment_status: Set("due".to_string()),
        invoice: Set("no".to_string()),
        payment_date: Set(Some("---".to_string())),
        ram: Set(Some("16GB".to_string())),
        processor: Set(Some("i7".to_string())),
        operating_system: Set(Some("ubuntu".to_string())),
        system_configuration: Set(Some("standard dev build".to_string())),
        is_assign: Set(false),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = asset::Entity::insert(row)
        .exec(db)
        .await
        .expect("Failed to create asset");
    res.last_insert_id
}

#[tokio::test]
async fn test_grouped_counts_by_type_and_brand() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;

    for _ in 0..3 {
        create_test_asset(
            &db,
            AssetSpec {
                type_id: Some(laptop),
                brand: "Dell",
                price: 1000.0,
                quantity: 1,
                vendor_id: None,
            },
        )
        .await;
    }

    let rows = report_service::grouped_counts(&db, true)
        .await
        .expect("grouped_counts failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].asset_type, "Laptop");
    assert_eq!(rows[0].asset_brand, "Dell");
    assert_eq!(rows[0].count, 3);
}

#[tokio::test]
async fn test_grouped_counts_excludes_assigned_when_remaining_only() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    let emp = create_test_employee(&db, "a@example.com", "EMP-1").await;

    let taken = create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;
    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1500.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;

    assignment_service::assign(&db, emp, &[taken], None)
        .await
        .expect("assign failed");

    let remaining = report_service::grouped_counts(&db, true)
        .await
        .expect("grouped_counts failed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].count, 1);

    let all = report_service::grouped_counts(&db, false)
        .await
        .expect("grouped_counts failed");
    assert_eq!(all[0].count, 2);
}

#[tokio::test]
async fn test_dashboard_rollup_merges_brands_per_type() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    let emp = create_test_employee(&db, "a@example.com", "EMP-1").await;

    let first = create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;
    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1500.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;

    assignment_service::assign(&db, emp, &[first], None)
        .await
        .expect("assign failed");

    let rollup = report_service::dashboard_rollup(&db)
        .await
        .expect("rollup failed");

    assert_eq!(rollup.len(), 1);
    let row = &rollup[0];
    assert_eq!(row.asset_type, "Laptop");
    assert_eq!(row.count, 2);
    assert_eq!(row.asset_price, 2500.0);
    assert_eq!(row.remaining, 1);
    // Dashboard rows are type-level only.
    assert!(row.asset_brand.is_none());
}

#[tokio::test]
async fn test_rollup_skips_assets_with_no_type() {
    let db = setup_test_db().await;
    create_test_asset_type(&db, "Laptop").await;

    create_test_asset(
        &db,
        AssetSpec {
            type_id: None,
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;

    let rollup = report_service::dashboard_rollup(&db)
        .await
        .expect("rollup failed");
    assert!(rollup.is_empty());
}

#[tokio::test]
async fn test_totals_by_type_sums_quantity_and_omits_empty_types() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    create_test_asset_type(&db, "Monitor").await;

    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 2,
            vendor_id: None,
        },
    )
    .await;
    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Lenovo",
            price: 900.0,
            quantity: 3,
            vendor_id: None,
        },
    )
    .await;

    let totals = report_service::totals_by_type(&db)
        .await
        .expect("totals failed");

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].asset_type, "Laptop");
    assert_eq!(totals[0].total_quantity, 5);
}

#[tokio::test]
async fn test_vendor_rollup_scopes_to_one_vendor_and_carries_brand() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    let vendor_a = create_test_vendor(&db, "a@vendor.com").await;
    let vendor_b = create_test_vendor(&db, "b@vendor.com").await;

    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: Some(vendor_a),
        },
    )
    .await;
    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Lenovo",
            price: 900.0,
            quantity: 1,
            vendor_id: Some(vendor_b),
        },
    )
    .await;

    let rollup = report_service::vendor_rollup(&db, vendor_a)
        .await
        .expect("vendor rollup failed");

    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].asset_type, "Laptop");
    assert_eq!(rollup[0].count, 1);
    assert_eq!(rollup[0].asset_brand.as_deref(), Some("Dell"));
}

#[tokio::test]
async fn test_employee_asset_summary_shape() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    let emp = create_test_employee(&db, "asha@example.com", "EMP-1").await;
    let asset_id = create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;

    assignment_service::assign(&db, emp, &[asset_id], None)
        .await
        .expect("assign failed");

    let summaries = report_service::employee_asset_summary(&db, "asha@example.com")
        .await
        .expect("summary failed");

    assert_eq!(summaries.len(), 1);
    let s = &summaries[0];
    assert_eq!(s.brand, "Dell");
    assert_eq!(s.asset_type, "Laptop");
    assert_eq!(s.ram.as_deref(), Some("16GB"));
    assert_eq!(s.processor.as_deref(), Some("i7"));
    assert_eq!(s.operating_system.as_deref(), Some("ubuntu"));
    assert_eq!(s.system_configuration.as_deref(), Some("standard dev build"));

    // The wire shape renames asset_type to "type".
    let json = serde_json::to_value(s).expect("serialize failed");
    assert_eq!(json["type"], "Laptop");
    assert_eq!(json["brand"], "Dell");
}

#[tokio::test]
async fn test_employee_asset_summary_unknown_email_is_empty() {
    let db = setup_test_db().await;
    let summaries = report_service::employee_asset_summary(&db, "nobody@example.com")
        .await
        .expect("summary failed");
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn test_dashboard_counters() {
    let db = setup_test_db().await;
    let laptop = create_test_asset_type(&db, "Laptop").await;
    let emp = create_test_employee(&db, "a@example.com", "EMP-1").await;

    let taken = create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Dell",
            price: 1000.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;
    create_test_asset(
        &db,
        AssetSpec {
            type_id: Some(laptop),
            brand: "Lenovo",
            price: 900.0,
            quantity: 1,
            vendor_id: None,
        },
    )
    .await;

    assignment_service::assign(&db, emp, &[taken], None)
        .await
        .expect("assign failed");

    let counters = report_service::dashboard_counters(&db)
        .await
        .expect("counters failed");

    assert_eq!(counters.total_assets, 2);
    assert_eq!(counters.total_employees, 1);
    assert_eq!(counters.total_remaining_assets, 1);
    assert_eq!(counters.total_price, 1900.0);
    assert_eq!(counters.total_remaining_price, 900.0);
    assert_eq!(counters.assigned_today, 1);
    assert_eq!(counters.assigned_yesterday, 0);
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

// Drives the HTTP handlers end to end: is_active must be derived from
// is_dispatch on both create and update, whatever the client sends.
#[tokio::test]
async fn test_client_asset_handlers_derive_active_from_dispatch() {
    let db = setup_test_db().await;
    let app = api::api_router(db.clone());

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/client-assets",
            json!({
                "client_name": "Acme",
                "project": "Portal",
                "project_owner": "PM",
                "asset_brand": "Dell",
                "is_dispatch": false,
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let row = client_asset::Entity::find()
        .one(&db)
        .await
        .expect("query failed")
        .expect("row missing");
    assert!(!row.is_dispatch);
    assert!(row.is_active);

    let resp = app
        .oneshot(json_request(
            "PUT",
            &format!("/client-assets/{}", row.id),
            json!({
                "client_name": "Acme",
                "project": "Portal",
                "project_owner": "PM",
                "asset_brand": "Dell",
                "is_dispatch": true,
                "date_of_dispatch": "2024-03-01",
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let row = client_asset::Entity::find_by_id(row.id)
        .one(&db)
        .await
        .expect("query failed")
        .expect("row missing");
    assert!(row.is_dispatch);
    assert!(!row.is_active);
}

#[tokio::test]
async fn test_client_asset_handler_rejects_unknown_choice() {
    let db = setup_test_db().await;
    let app = api::api_router(db.clone());

    let resp = app
        .oneshot(json_request(
            "POST",
            "/client-assets",
            json!({
                "client_name": "Acme",
                "project": "Portal",
                "project_owner": "PM",
                "asset_brand": "Dell",
                "ram": "3GB",
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let rows = client_asset::Entity::find()
        .all(&db)
        .await
        .expect("query failed");
    assert!(rows.is_empty());
}
