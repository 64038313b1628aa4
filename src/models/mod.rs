pub mod asset;
pub mod asset_type;
pub mod assign_asset;
pub mod choices;
pub mod client_asset;
pub mod employee;
pub mod user;
pub mod vendor;
