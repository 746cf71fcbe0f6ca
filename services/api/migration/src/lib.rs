use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250601_000001_create_identities;
mod m20250601_000002_create_credentials;
mod m20250601_000003_create_profiles;
mod m20250601_000004_create_projects;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_identities::Migration),
            Box::new(m20250601_000002_create_credentials::Migration),
            Box::new(m20250601_000003_create_profiles::Migration),
            Box::new(m20250601_000004_create_projects::Migration),
        ]
    }
}
