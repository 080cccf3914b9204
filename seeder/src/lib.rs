pub use sea_orm_migration::prelude::*;

pub mod fixtures;
mod m20240812_000001_seed_fixtures;

/// Schema migrations followed by the fixture data, so a fresh database can
/// be stood up with a single `up`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        let mut migrations = migration::Migrator::migrations();
        migrations.push(Box::new(m20240812_000001_seed_fixtures::Migration));
        migrations
    }
}
