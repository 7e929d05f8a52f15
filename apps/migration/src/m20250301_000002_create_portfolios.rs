use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Portfolios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Portfolios::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Portfolios::UserId).uuid().not_null())
                    .col(ColumnDef::new(Portfolios::FullName).string().not_null())
                    .col(ColumnDef::new(Portfolios::Description).text().null())
                    .col(ColumnDef::new(Portfolios::Technologies).text().not_null())
                    .col(
                        ColumnDef::new(Portfolios::SpokenLanguages)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Portfolios::ProgrammingLanguages)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Portfolios::Projects).text().not_null())
                    .col(ColumnDef::new(Portfolios::SocialLinks).text().not_null())
                    .col(ColumnDef::new(Portfolios::CvPath).string().null())
                    .col(ColumnDef::new(Portfolios::ImagePath).string().null())
                    .col(
                        ColumnDef::new(Portfolios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Portfolios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolios_user_id")
                            .from(Portfolios::Table, Portfolios::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_user_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Portfolios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
    UserId,
    FullName,
    Description,
    Technologies,
    SpokenLanguages,
    ProgrammingLanguages,
    Projects,
    SocialLinks,
    CvPath,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}
