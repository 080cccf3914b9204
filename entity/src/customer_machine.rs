use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::resource::{ResourceTrait, Timestamped};

/// A machine installed at a customer site, identified by its serial code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_machines")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub code: String,
    pub customer_id: i32,
    pub model_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::machine_model::Entity",
        from = "Column::ModelId",
        to = "super::machine_model::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    MachineModel,
    #[sea_orm(has_many = "super::rotation::Entity")]
    Rotation,
    #[sea_orm(has_many = "super::operating_time::Entity")]
    OperatingTime,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::machine_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineModel.def()
    }
}

impl Related<super::rotation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rotation.def()
    }
}

impl Related<super::operating_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperatingTime.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(self.touch(insert))
    }
}

impl Timestamped for ActiveModel {
    fn set_created_at(&mut self, at: DateTimeUtc) {
        self.created_at = Set(at);
    }

    fn set_updated_at(&mut self, at: DateTimeUtc) {
        self.updated_at = Set(at);
    }

    fn created_at_unset(&self) -> bool {
        self.created_at.is_not_set()
    }
}

impl ResourceTrait for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn default_sort_column() -> Column {
        Column::CreatedAt
    }
}
