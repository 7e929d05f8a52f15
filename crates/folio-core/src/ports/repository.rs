use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Portfolio, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. A duplicate email surfaces as
    /// `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Record the most recently issued token for a user (bookkeeping only).
    async fn record_token(&self, id: Uuid, token: &str) -> Result<(), RepoError>;
}

/// Portfolio repository.
///
/// Mutating operations take the acting user and enforce ownership before
/// touching the row, failing with `RepoError::Forbidden` for non-owners.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Persist a new portfolio.
    async fn insert(&self, portfolio: Portfolio) -> Result<Portfolio, RepoError>;

    /// Find a portfolio by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Portfolio>, RepoError>;

    /// All portfolios owned by a user.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Portfolio>, RepoError>;

    /// Full-field overwrite of an existing portfolio.
    async fn update(&self, portfolio: Portfolio, acting_user: Uuid) -> Result<Portfolio, RepoError>;

    /// Delete a portfolio, returning the removed record so the caller can
    /// clean up its on-disk files.
    async fn delete(&self, id: Uuid, acting_user: Uuid) -> Result<Portfolio, RepoError>;
}
