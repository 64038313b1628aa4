use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hardware configuration dispatched to an external client project.
/// Not a literal asset-to-client link; `is_active` is always `!is_dispatch`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client_assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_name: String,
    pub project: String,
    pub project_owner: String,
    pub employee_id: Option<i32>,
    pub asset_type_id: Option<i32>,
    pub asset_brand: String,
    pub configuration: Option<String>,
    pub ram: Option<String>,
    pub ssd: Option<String>,
    pub processor: Option<String>,
    pub operating_system: Option<String>,
    pub storage: Option<String>,
    pub serial_number: Option<String>,
    pub is_dispatch: bool,
    pub date_of_dispatch: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::asset_type::Entity",
        from = "Column::AssetTypeId",
        to = "super::asset_type::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssetType,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::asset_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientAssetDto {
    pub id: Option<i32>,
    pub client_name: String,
    pub project: String,
    pub project_owner: String,
    pub employee_id: Option<i32>,
    pub asset_type_id: Option<i32>,
    pub asset_brand: String,
    pub configuration: Option<String>,
    pub ram: Option<String>,
    pub ssd: Option<String>,
    pub processor: Option<String>,
    pub operating_system: Option<String>,
    pub storage: Option<String>,
    pub serial_number: Option<String>,
    #[serde(default)]
    pub is_dispatch: bool,
    pub date_of_dispatch: Option<String>,
    pub description: Option<String>,
}
