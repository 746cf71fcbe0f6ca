use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One profile per identity; the index is the authoritative guard.
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::FirstName).string().not_null())
                    .col(
                        ColumnDef::new(Profiles::LastName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Profiles::Email).string())
                    .col(ColumnDef::new(Profiles::Bio).text())
                    .col(ColumnDef::new(Profiles::Location).string())
                    .col(ColumnDef::new(Profiles::Website).string())
                    .col(ColumnDef::new(Profiles::Github).string())
                    .col(ColumnDef::new(Profiles::Linkedin).string())
                    .col(ColumnDef::new(Profiles::Skills).json_binary())
                    .col(ColumnDef::new(Profiles::Avatar).string())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Identities::Table, Identities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Email,
    Bio,
    Location,
    Website,
    Github,
    Linkedin,
    Skills,
    Avatar,
    CreatedAt,
}

#[derive(Iden)]
enum Identities {
    Table,
    Id,
}
