//! Database connection management and SeaORM repositories.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{connect, DatabaseConfig, DbConn};
pub use postgres_repo::{PostgresPortfolioRepository, PostgresUserRepository};
