use assetdesk::db;
use assetdesk::models::{asset, assign_asset, asset_type, employee};
use assetdesk::services::assignment_service::{self, AssignOutcome};
use assetdesk::services::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test asset type
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

// Helper to create a test employee
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

// Helper to create a test asset
async fn create_test_asset(
    db: &DatabaseConnection,
    type_id: i32,
    brand: &str,
    price: f64,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let row = asset::ActiveModel {
        asset_type_id: Set(Some(type_id)),
        asset_brand: Set(brand.to_string()),
        price: Set(price),
        quantity: Set(1),
        payment_status: Set("due".to_string()),
        invoice: Set("no".to_string()),
        payment_date: Set(Some("---".to_string())),
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

async fn asset_flag(db: &DatabaseConnection, asset_id: i32) -> bool {
    asset::Entity::find_by_id(asset_id)
        .one(db)
        .await
        .expect("query failed")
        .expect("asset missing")
        .is_assign
}

async fn link_count(db: &DatabaseConnection, asset_id: i32) -> u64 {
    assign_asset::Entity::find()
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .count(db)
        .await
        .expect("count failed")
}

#[tokio::test]
async fn test_assign_sets_flag_and_creates_link() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_id = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    let outcome = assignment_service::assign(&db, emp_id, &[asset_id], None)
        .await
        .expect("assign failed");

    assert_eq!(
        outcome,
        AssignOutcome {
            assigned: vec![asset_id],
            already_assigned: vec![],
            missing: vec![],
        }
    );
    assert!(asset_flag(&db, asset_id).await);
    assert_eq!(link_count(&db, asset_id).await, 1);
}

#[tokio::test]
async fn test_assign_same_asset_twice_is_conflict() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    assignment_service::assign(&db, emp_a, &[asset_id], None)
        .await
        .expect("first assign failed");

    let outcome = assignment_service::assign(&db, emp_b, &[asset_id], None)
        .await
        .expect("second assign should not error");

    assert!(outcome.assigned.is_empty());
    assert_eq!(outcome.already_assigned, vec![asset_id]);
    // Still exactly one link row, still held by the first employee.
    assert_eq!(link_count(&db, asset_id).await, 1);
    let link = assign_asset::Entity::find()
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.employee_id, emp_a);
}

#[tokio::test]
async fn test_batch_assign_processes_every_asset() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;

    let free_1 = create_test_asset(&db, type_id, "Dell", 1000.0).await;
    let taken = create_test_asset(&db, type_id, "Dell", 1500.0).await;
    let free_2 = create_test_asset(&db, type_id, "Lenovo", 900.0).await;

    assignment_service::assign(&db, emp_a, &[taken], None)
        .await
        .expect("setup assign failed");

    // A conflict in the middle of the batch must not stop the later assets.
    let outcome = assignment_service::assign(&db, emp_b, &[free_1, taken, free_2, 9999], None)
        .await
        .expect("batch assign failed");

    assert_eq!(outcome.assigned, vec![free_1, free_2]);
    assert_eq!(outcome.already_assigned, vec![taken]);
    assert_eq!(outcome.missing, vec![9999]);
    assert!(asset_flag(&db, free_1).await);
    assert!(asset_flag(&db, free_2).await);
}

#[tokio::test]
async fn test_assign_to_missing_employee_is_not_found() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    let err = assignment_service::assign(&db, 424242, &[asset_id], None)
        .await
        .expect_err("expected NotFound");
    assert_eq!(err, ServiceError::NotFound);
    assert!(!asset_flag(&db, asset_id).await);
}

#[tokio::test]
async fn test_unassign_clears_flag_and_deletes_link() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_id = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    assignment_service::assign(&db, emp_id, &[asset_id], None)
        .await
        .expect("assign failed");
    assignment_service::unassign(&db, emp_id, asset_id)
        .await
        .expect("unassign failed");

    assert!(!asset_flag(&db, asset_id).await);
    assert_eq!(link_count(&db, asset_id).await, 0);
}

#[tokio::test]
async fn test_unassign_without_assignment_is_not_found() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_id = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    let err = assignment_service::unassign(&db, emp_id, asset_id)
        .await
        .expect_err("expected NotFound");
    assert_eq!(err, ServiceError::NotFound);
}

#[tokio::test]
async fn test_reassign_releases_previous_asset() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;
    let old_asset = create_test_asset(&db, type_id, "Dell", 1000.0).await;
    let new_asset = create_test_asset(&db, type_id, "Lenovo", 900.0).await;

    assignment_service::assign(&db, emp_a, &[old_asset], None)
        .await
        .expect("assign failed");
    let link_id = assign_asset::Entity::find()
        .filter(assign_asset::Column::AssetId.eq(old_asset))
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .id;

    let updated = assignment_service::reassign(&db, link_id, emp_b, new_asset, None)
        .await
        .expect("reassign failed");

    assert_eq!(updated.employee_id, emp_b);
    assert_eq!(updated.asset_id, new_asset);
    // The old asset goes back into the free pool.
    assert!(!asset_flag(&db, old_asset).await);
    assert!(asset_flag(&db, new_asset).await);
    assert_eq!(link_count(&db, old_asset).await, 0);
    assert_eq!(link_count(&db, new_asset).await, 1);
}

#[tokio::test]
async fn test_reassign_to_claimed_asset_is_conflict() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;
    let asset_a = create_test_asset(&db, type_id, "Dell", 1000.0).await;
    let asset_b = create_test_asset(&db, type_id, "Lenovo", 900.0).await;

    assignment_service::assign(&db, emp_a, &[asset_a], None)
        .await
        .expect("assign failed");
    assignment_service::assign(&db, emp_b, &[asset_b], None)
        .await
        .expect("assign failed");

    let link_a = assign_asset::Entity::find()
        .filter(assign_asset::Column::AssetId.eq(asset_a))
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .id;

    let err = assignment_service::reassign(&db, link_a, emp_a, asset_b, None)
        .await
        .expect_err("expected AlreadyAssigned");
    assert_eq!(err, ServiceError::AlreadyAssigned);
    // Nothing moved.
    assert!(asset_flag(&db, asset_a).await);
    assert!(asset_flag(&db, asset_b).await);
}

#[tokio::test]
async fn test_reassign_same_asset_keeps_it_assigned() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    assignment_service::assign(&db, emp_a, &[asset_id], None)
        .await
        .expect("assign failed");
    let link_id = assign_asset::Entity::find()
        .filter(assign_asset::Column::AssetId.eq(asset_id))
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .id;

    let updated = assignment_service::reassign(&db, link_id, emp_b, asset_id, None)
        .await
        .expect("reassign failed");

    assert_eq!(updated.employee_id, emp_b);
    assert!(asset_flag(&db, asset_id).await);
    assert_eq!(link_count(&db, asset_id).await, 1);
}

#[tokio::test]
async fn test_release_for_employee_frees_every_held_asset() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_id = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let asset_1 = create_test_asset(&db, type_id, "Dell", 1000.0).await;
    let asset_2 = create_test_asset(&db, type_id, "Lenovo", 900.0).await;
    let asset_3 = create_test_asset(&db, type_id, "HP", 800.0).await;

    assignment_service::assign(&db, emp_id, &[asset_1, asset_2, asset_3], None)
        .await
        .expect("assign failed");

    let txn = db.begin().await.expect("begin failed");
    let released = assignment_service::release_for_employee(&txn, emp_id)
        .await
        .expect("release failed");
    txn.commit().await.expect("commit failed");

    assert_eq!(released, 3);
    for id in [asset_1, asset_2, asset_3] {
        assert!(!asset_flag(&db, id).await);
        assert_eq!(link_count(&db, id).await, 0);
    }
}

#[tokio::test]
async fn test_release_for_asset_removes_link_rows() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_id = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    assignment_service::assign(&db, emp_id, &[asset_id], None)
        .await
        .expect("assign failed");

    let txn = db.begin().await.expect("begin failed");
    let released = assignment_service::release_for_asset(&txn, asset_id)
        .await
        .expect("release failed");
    txn.commit().await.expect("commit failed");

    assert_eq!(released, 1);
    assert_eq!(link_count(&db, asset_id).await, 0);
}

#[tokio::test]
async fn test_unique_index_blocks_duplicate_link_rows() {
    let db = setup_test_db().await;
    let type_id = create_test_asset_type(&db, "Laptop").await;
    let emp_a = create_test_employee(&db, "a@example.com", "EMP-1").await;
    let emp_b = create_test_employee(&db, "b@example.com", "EMP-2").await;
    let asset_id = create_test_asset(&db, type_id, "Dell", 1000.0).await;

    let now = chrono::Utc::now().to_rfc3339();
    let first = assign_asset::ActiveModel {
        employee_id: Set(emp_a),
        asset_id: Set(asset_id),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    first.insert(&db).await.expect("first insert failed");

    // Bypassing the service must still hit the schema-level guard.
    let second = assign_asset::ActiveModel {
        employee_id: Set(emp_b),
        asset_id: Set(asset_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    assert!(second.insert(&db).await.is_err());
}
