//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use folio_core::domain::{Portfolio, User};
use folio_core::error::RepoError;
use folio_core::ports::{PortfolioRepository, UserRepository};

use super::entity::portfolio::{self, Entity as PortfolioEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_db_err(e: sea_orm::DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn record_token(&self, id: Uuid, token: &str) -> Result<(), RepoError> {
        let active_model = user::ActiveModel {
            id: Set(id),
            last_token: Set(Some(token.to_owned())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => RepoError::NotFound,
            other => RepoError::Query(other.to_string()),
        })?;

        Ok(())
    }
}

/// PostgreSQL portfolio repository.
///
/// `update` and `delete` check ownership against the stored row before
/// mutating anything.
pub struct PostgresPortfolioRepository {
    db: DbConn,
}

impl PostgresPortfolioRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn load_owned(&self, id: Uuid, acting_user: Uuid) -> Result<portfolio::Model, RepoError> {
        let model = PortfolioEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        if model.user_id != acting_user {
            tracing::warn!(
                portfolio_id = %id,
                acting_user = %acting_user,
                "Ownership check failed"
            );
            return Err(RepoError::Forbidden);
        }

        Ok(model)
    }
}

#[async_trait]
impl PortfolioRepository for PostgresPortfolioRepository {
    async fn insert(&self, entity: Portfolio) -> Result<Portfolio, RepoError> {
        let active_model: portfolio::ActiveModel = entity.try_into()?;
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        model.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Portfolio>, RepoError> {
        let result = PortfolioEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.map(Portfolio::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Portfolio>, RepoError> {
        let result = PortfolioEntity::find()
            .filter(portfolio::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.into_iter().map(Portfolio::try_from).collect()
    }

    async fn update(&self, entity: Portfolio, acting_user: Uuid) -> Result<Portfolio, RepoError> {
        self.load_owned(entity.id, acting_user).await?;

        let active_model: portfolio::ActiveModel = entity.try_into()?;
        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => RepoError::NotFound,
                other => RepoError::Query(other.to_string()),
            })?;

        model.try_into()
    }

    async fn delete(&self, id: Uuid, acting_user: Uuid) -> Result<Portfolio, RepoError> {
        let model = self.load_owned(id, acting_user).await?;

        let result = PortfolioEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        model.try_into()
    }
}
