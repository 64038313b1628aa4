use crate::auth::hash_password;
use crate::models::{asset, asset_type, employee, user, vendor};
use sea_orm::*;

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Admin user
    let admin_password =
        hash_password("admin").map_err(|e| DbErr::Custom(format!("password hash: {:?}", e)))?;
    let admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        email: Set("admin@example.com".to_owned()),
        mobile_number: Set(Some("9876543210".to_owned())),
        password_hash: Set(admin_password),
        role: Set("admin".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    user::Entity::insert(admin)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await?;

    // 2. Asset types
    for name in ["Laptop", "Monitor", "Keyboard", "Mouse"] {
        let asset_type = asset_type::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        asset_type::Entity::insert(asset_type)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(asset_type::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 3. A vendor
    let vendor = vendor::ActiveModel {
        first_name: Set(Some("Default".to_owned())),
        last_name: Set(Some("Vendor".to_owned())),
        email: Set("vendor@example.com".to_owned()),
        mobile_number: Set("9876500000".to_owned()),
        address: Set(Some("12 Supply Street".to_owned())),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    vendor::Entity::insert(vendor)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(vendor::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await?;

    // 4. An employee
    let emp = employee::ActiveModel {
        first_name: Set(Some("Asha".to_owned())),
        last_name: Set(Some("Patel".to_owned())),
        email: Set("asha.patel@example.com".to_owned()),
        employee_id: Set("EMP-0001".to_owned()),
        date_of_joining: Set(Some("2023-01-16".to_owned())),
        mobile_number: Set("9876511111".to_owned()),
        technology: Set(Some("Python".to_owned())),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    employee::Entity::insert(emp)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(employee::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await?;

    // 5. A couple of laptops if the table is empty
    let existing = asset::Entity::find().count(db).await?;
    if existing == 0 {
        let laptop_type = asset_type::Entity::find()
            .filter(asset_type::Column::Name.eq("Laptop"))
            .one(db)
            .await?;
        let vendor = vendor::Entity::find().one(db).await?;

        for (brand, price, serial) in [
            ("Dell", 1000.0, "DL-1001"),
            ("Dell", 1500.0, "DL-1002"),
            ("Lenovo", 900.0, "LN-2001"),
        ] {
            let a = asset::ActiveModel {
                asset_type_id: Set(laptop_type.as_ref().map(|t| t.id)),
                asset_brand: Set(brand.to_owned()),
                price: Set(price),
                vendor_id: Set(vendor.as_ref().map(|v| v.id)),
                quantity: Set(1),
                payment_status: Set("due".to_owned()),
                invoice: Set("no".to_owned()),
                payment_date: Set(Some("---".to_owned())),
                ram: Set(Some("16GB".to_owned())),
                ssd: Set(Some("256".to_owned())),
                processor: Set(Some("i7".to_owned())),
                operating_system: Set(Some("ubuntu".to_owned())),
                storage: Set(Some("512".to_owned())),
                serial_number: Set(Some(serial.to_owned())),
                is_assign: Set(false),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            };
            a.insert(db).await?;
        }
    }

    Ok(())
}
