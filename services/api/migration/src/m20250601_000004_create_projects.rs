use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::OwnerProfileId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::Tags).json_binary())
                    .col(ColumnDef::new(Projects::Status).string())
                    .col(ColumnDef::new(Projects::MaxMembers).integer())
                    .col(ColumnDef::new(Projects::CurrentMembers).integer())
                    .col(ColumnDef::new(Projects::RepositoryUrl).string())
                    .col(ColumnDef::new(Projects::ContactInfo).string())
                    .col(ColumnDef::new(Projects::CreatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Projects::Table, Projects::OwnerProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_owner_profile_id")
                    .table(Projects::Table)
                    .col(Projects::OwnerProfileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    OwnerProfileId,
    Title,
    Description,
    Tags,
    Status,
    MaxMembers,
    CurrentMembers,
    RepositoryUrl,
    ContactInfo,
    CreatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}
