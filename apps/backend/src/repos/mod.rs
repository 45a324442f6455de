//! Repository layer: typed data access over the SeaORM entities.
//!
//! Functions are generic over [`sea_orm::ConnectionTrait`] so they run
//! against the pooled connection or a transaction alike. Text columns are
//! trimmed on write and again on read, so rows persisted before the
//! trimming rule still come back clean.

pub mod foods;
pub mod ingredients;
pub mod restaurants;

pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_string()
}
