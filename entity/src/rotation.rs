use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::resource::{ResourceTrait, Timestamped};

/// Daily shaft rotation counters reported for one customer machine.
///
/// At most one row may exist per machine and date; writers check for an
/// existing row before inserting.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rotations")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub date: Date,
    pub shaft_a_normal_rotation: i32,
    pub shaft_a_reverse_rotation: i32,
    pub customer_machine_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_machine::Entity",
        from = "Column::CustomerMachineId",
        to = "super::customer_machine::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CustomerMachine,
}

impl Related<super::customer_machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerMachine.def()
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
