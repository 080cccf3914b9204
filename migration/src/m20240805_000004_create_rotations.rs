use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240805_000003_create_customer_machines::CustomerMachines;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rotations::Table)
                    .if_not_exists()
                    .col(pk_auto(Rotations::Id))
                    .col(date(Rotations::Date))
                    .col(integer(Rotations::ShaftANormalRotation))
                    .col(integer(Rotations::ShaftAReverseRotation))
                    .col(integer(Rotations::CustomerMachineId))
                    .col(
                        timestamp_with_time_zone(Rotations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Rotations::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-rotations-customer_machine_id")
                            .from(Rotations::Table, Rotations::CustomerMachineId)
                            .to(CustomerMachines::Table, CustomerMachines::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-rotations-date-customer_machine_id")
                    .table(Rotations::Table)
                    .col(Rotations::Date)
                    .col(Rotations::CustomerMachineId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rotations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rotations {
    Table,
    Id,
    Date,
    ShaftANormalRotation,
    ShaftAReverseRotation,
    CustomerMachineId,
    CreatedAt,
    UpdatedAt,
}
