//! Application state - shared across all handlers.

use std::path::Path;
use std::sync::Arc;

use folio_core::ports::{FileStore, PortfolioRepository, UserRepository};
use folio_infra::{DbConn, LocalFileStore, PostgresPortfolioRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub portfolios: Arc<dyn PortfolioRepository>,
    pub files: Arc<dyn FileStore>,
}

impl AppState {
    /// Wire repositories and the file store onto the shared connection pool.
    pub fn new(db: DbConn, upload_dir: &Path) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            portfolios: Arc::new(PostgresPortfolioRepository::new(db)),
            files: Arc::new(LocalFileStore::new(upload_dir)),
        }
    }
}
