pub use sea_orm_migration::prelude::*;

mod m20250102_000001_create_user_table;
mod m20250102_000002_create_team_tables;
mod m20250109_000001_create_invitation_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250102_000001_create_user_table::Migration),
            Box::new(m20250102_000002_create_team_tables::Migration),
            Box::new(m20250109_000001_create_invitation_table::Migration),
        ]
    }
}
