//! Portfolio entity for SeaORM.
//!
//! List fields are flattened to separator-joined text and the embedded
//! project/social-link lists are stored as JSON text, so conversions to and
//! from the domain type are fallible in the decoding direction.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{decode_list, encode_list, Portfolio};
use folio_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub technologies: String,
    #[sea_orm(column_type = "Text")]
    pub spoken_languages: String,
    #[sea_orm(column_type = "Text")]
    pub programming_languages: String,
    #[sea_orm(column_type = "Text")]
    pub projects: String,
    #[sea_orm(column_type = "Text")]
    pub social_links: String,
    #[sea_orm(nullable)]
    pub cv_path: Option<String>,
    #[sea_orm(nullable)]
    pub image_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Decode a stored row into the domain Portfolio.
impl TryFrom<Model> for Portfolio {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let projects = serde_json::from_str(&model.projects)
            .map_err(|e| RepoError::Query(format!("corrupt projects column: {e}")))?;
        let social_links = serde_json::from_str(&model.social_links)
            .map_err(|e| RepoError::Query(format!("corrupt social_links column: {e}")))?;

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            description: model.description,
            technologies: decode_list(&model.technologies),
            spoken_languages: decode_list(&model.spoken_languages),
            programming_languages: decode_list(&model.programming_languages),
            projects,
            social_links,
            cv_path: model.cv_path,
            image_path: model.image_path,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Encode the domain Portfolio into an ActiveModel ready to persist.
impl TryFrom<Portfolio> for ActiveModel {
    type Error = RepoError;

    fn try_from(portfolio: Portfolio) -> Result<Self, Self::Error> {
        let projects = serde_json::to_string(&portfolio.projects)
            .map_err(|e| RepoError::Query(format!("encoding projects: {e}")))?;
        let social_links = serde_json::to_string(&portfolio.social_links)
            .map_err(|e| RepoError::Query(format!("encoding social_links: {e}")))?;

        Ok(Self {
            id: Set(portfolio.id),
            user_id: Set(portfolio.user_id),
            full_name: Set(portfolio.full_name),
            description: Set(portfolio.description),
            technologies: Set(encode_list(&portfolio.technologies)),
            spoken_languages: Set(encode_list(&portfolio.spoken_languages)),
            programming_languages: Set(encode_list(&portfolio.programming_languages)),
            projects: Set(projects),
            social_links: Set(social_links),
            cv_path: Set(portfolio.cv_path),
            image_path: Set(portfolio.image_path),
            created_at: Set(portfolio.created_at.into()),
            updated_at: Set(portfolio.updated_at.into()),
        })
    }
}
