use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_type_id: Option<i32>,
    pub asset_brand: String,
    pub price: f64,
    pub vendor_id: Option<i32>,
    pub quantity: i32,
    pub payment_status: String, // 'due', 'done'
    pub invoice: String,        // 'yes', 'no'
    /// Derived on save: timestamp when payment_status is 'done', "---" otherwise.
    pub payment_date: Option<String>,
    pub purchase_date: Option<String>,
    pub system_configuration: Option<String>,
    pub ram: Option<String>,
    pub ssd: Option<String>,
    pub processor: Option<String>,
    pub operating_system: Option<String>,
    pub storage: Option<String>,
    pub serial_number: Option<String>,
    pub invoice_number: Option<String>,
    pub is_assign: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset_type::Entity",
        from = "Column::AssetTypeId",
        to = "super::asset_type::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssetType,
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Vendor,
    #[sea_orm(has_many = "super::assign_asset::Entity")]
    AssignAsset,
}

impl Related<super::asset_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetType.def()
    }
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::assign_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignAsset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssetDto {
    pub id: Option<i32>,
    pub asset_type_id: Option<i32>,
    pub asset_brand: String,
    pub price: f64,
    pub vendor_id: Option<i32>,
    #[serde(default)]
    pub quantity: i32,
    pub payment_status: String,
    pub invoice: String,
    pub purchase_date: Option<String>,
    pub system_configuration: Option<String>,
    pub ram: Option<String>,
    pub ssd: Option<String>,
    pub processor: Option<String>,
    pub operating_system: Option<String>,
    pub storage: Option<String>,
    pub serial_number: Option<String>,
    pub invoice_number: Option<String>,
}
