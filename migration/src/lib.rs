pub use sea_orm_migration::prelude::*;

mod m20240805_000001_create_users;
mod m20240805_000002_create_machine_models;
mod m20240805_000003_create_customer_machines;
mod m20240805_000004_create_rotations;
mod m20240805_000005_create_operating_times;
mod m20240805_000006_create_revoked_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240805_000001_create_users::Migration),
            Box::new(m20240805_000002_create_machine_models::Migration),
            Box::new(m20240805_000003_create_customer_machines::Migration),
            Box::new(m20240805_000004_create_rotations::Migration),
            Box::new(m20240805_000005_create_operating_times::Migration),
            Box::new(m20240805_000006_create_revoked_tokens::Migration),
        ]
    }
}
