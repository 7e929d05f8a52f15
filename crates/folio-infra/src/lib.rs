//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! Argon2 password hashing, JWT tokens, SeaORM Postgres repositories and
//! local-disk file storage.

pub mod auth;
pub mod database;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    connect, DatabaseConfig, DbConn, PostgresPortfolioRepository, PostgresUserRepository,
};
pub use storage::LocalFileStore;
