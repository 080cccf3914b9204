use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MachineModels::Table)
                    .if_not_exists()
                    .col(pk_auto(MachineModels::Id))
                    .col(string(MachineModels::Name))
                    .col(
                        timestamp_with_time_zone(MachineModels::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MachineModels::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MachineModels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MachineModels {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}
