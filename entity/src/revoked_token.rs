use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::resource::Timestamped;

/// Blocklist of JWT ids that may no longer be used.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revoked_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    #[sea_orm(unique)]
    pub jti: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
