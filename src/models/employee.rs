use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Badge number on the employee's card. Immutable once created.
    #[sea_orm(unique)]
    pub employee_id: String,
    pub date_of_joining: Option<String>,
    pub mobile_number: String,
    pub technology: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assign_asset::Entity")]
    AssignAsset,
    #[sea_orm(has_many = "super::client_asset::Entity")]
    ClientAsset,
}

impl Related<super::assign_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignAsset.def()
    }
}

impl Related<super::client_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAsset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub employee_id: Option<String>,
    pub date_of_joining: Option<String>,
    pub mobile_number: String,
    pub technology: Option<String>,
}
