use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create users table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            mobile_number TEXT,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create asset_types table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS asset_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create vendors table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS vendors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            email TEXT NOT NULL UNIQUE,
            mobile_number TEXT NOT NULL,
            address TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create employees table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            email TEXT NOT NULL UNIQUE,
            employee_id TEXT NOT NULL UNIQUE,
            date_of_joining TEXT,
            mobile_number TEXT NOT NULL,
            technology TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create assets table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            asset_type_id INTEGER,
            asset_brand TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            vendor_id INTEGER,
            quantity INTEGER NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'due',
            invoice TEXT NOT NULL DEFAULT 'no',
            payment_date TEXT,
            purchase_date TEXT,
            system_configuration TEXT,
            ram TEXT,
            ssd TEXT,
            processor TEXT,
            operating_system TEXT,
            storage TEXT,
            serial_number TEXT,
            invoice_number TEXT,
            is_assign INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (asset_type_id) REFERENCES asset_types(id) ON DELETE SET NULL,
            FOREIGN KEY (vendor_id) REFERENCES vendors(id) ON DELETE SET NULL
        );
        CREATE INDEX IF NOT EXISTS idx_assets_asset_type_id ON assets(asset_type_id);
        CREATE INDEX IF NOT EXISTS idx_assets_vendor_id ON assets(vendor_id);
        CREATE INDEX IF NOT EXISTS idx_assets_is_assign ON assets(is_assign);
        CREATE INDEX IF NOT EXISTS idx_assets_brand ON assets(asset_brand);
        "#
        .to_owned(),
    ))
    .await?;

    // Create assign_assets table.
    // The UNIQUE index on asset_id is the schema-level double-assignment guard:
    // two concurrent assigns for the same asset cannot both insert a link row.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS assign_assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL,
            asset_id INTEGER NOT NULL UNIQUE,
            date_of_assign TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE,
            FOREIGN KEY (asset_id) REFERENCES assets(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_assign_assets_employee_id ON assign_assets(employee_id);
        "#
        .to_owned(),
    ))
    .await?;

    // Create client_assets table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS client_assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_name TEXT NOT NULL,
            project TEXT NOT NULL,
            project_owner TEXT NOT NULL,
            employee_id INTEGER,
            asset_type_id INTEGER,
            asset_brand TEXT NOT NULL,
            configuration TEXT,
            ram TEXT,
            ssd TEXT,
            processor TEXT,
            operating_system TEXT,
            storage TEXT,
            serial_number TEXT,
            is_dispatch INTEGER NOT NULL DEFAULT 0,
            date_of_dispatch TEXT,
            description TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE SET NULL,
            FOREIGN KEY (asset_type_id) REFERENCES asset_types(id) ON DELETE SET NULL
        );
        CREATE INDEX IF NOT EXISTS idx_client_assets_employee_id ON client_assets(employee_id);
        "#
        .to_owned(),
    ))
    .await?;

    // Migration: invoice_number was added after the first release.
    // SQLite has no IF NOT EXISTS for ALTER TABLE, so the error is ignored.
    let _ = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "ALTER TABLE assets ADD COLUMN invoice_number TEXT".to_owned(),
        ))
        .await;

    Ok(())
}
