//! Services Layer
//!
//! Pure business logic without the HTTP layer. The assignment engine owns
//! every mutation of the asset/employee link; the report service owns every
//! read-side aggregate.

pub mod assignment_service;
pub mod report_service;

/// Error type for service operations
#[derive(Debug, PartialEq)]
pub enum ServiceError {
    Database(String),
    NotFound,
    AlreadyAssigned,
    Validation(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}
