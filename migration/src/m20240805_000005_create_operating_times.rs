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
                    .table(OperatingTimes::Table)
                    .if_not_exists()
                    .col(pk_auto(OperatingTimes::Id))
                    .col(date(OperatingTimes::Date))
                    .col(integer(OperatingTimes::Duration))
                    .col(integer(OperatingTimes::CustomerMachineId))
                    .col(
                        timestamp_with_time_zone(OperatingTimes::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(OperatingTimes::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-operating_times-customer_machine_id")
                            .from(OperatingTimes::Table, OperatingTimes::CustomerMachineId)
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
                    .name("idx-operating_times-date-customer_machine_id")
                    .table(OperatingTimes::Table)
                    .col(OperatingTimes::Date)
                    .col(OperatingTimes::CustomerMachineId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OperatingTimes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OperatingTimes {
    Table,
    Id,
    Date,
    Duration,
    CustomerMachineId,
    CreatedAt,
    UpdatedAt,
}
