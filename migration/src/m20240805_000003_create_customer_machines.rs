use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240805_000001_create_users::Users;
use crate::m20240805_000002_create_machine_models::MachineModels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerMachines::Table)
                    .if_not_exists()
                    .col(pk_auto(CustomerMachines::Id))
                    .col(string(CustomerMachines::Code))
                    .col(integer(CustomerMachines::CustomerId))
                    .col(integer(CustomerMachines::ModelId))
                    .col(
                        timestamp_with_time_zone(CustomerMachines::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CustomerMachines::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_machines-customer_id")
                            .from(CustomerMachines::Table, CustomerMachines::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_machines-model_id")
                            .from(CustomerMachines::Table, CustomerMachines::ModelId)
                            .to(MachineModels::Table, MachineModels::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerMachines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CustomerMachines {
    Table,
    Id,
    Code,
    CustomerId,
    ModelId,
    CreatedAt,
    UpdatedAt,
}
