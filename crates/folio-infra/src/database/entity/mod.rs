//! SeaORM entities and their conversions to domain types.

pub mod portfolio;
pub mod user;
