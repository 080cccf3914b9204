//! Behavior shared by every persisted resource.
//!
//! All tables in the schema carry `created_at` / `updated_at` columns and
//! answer the same sort and bulk-delete requests. [`ResourceTrait`] hangs
//! those helpers off each entity; [`Timestamped`] lets the save hooks stamp
//! the timestamp columns without knowing the concrete active model.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Order, QueryFilter};

#[async_trait::async_trait]
pub trait ResourceTrait: EntityTrait {
    /// Primary key column, used by the bulk helpers.
    fn id_column() -> Self::Column;

    /// Column to order by when a sort request names an unknown field.
    fn default_sort_column() -> Self::Column;

    /// Resolve a client-supplied sort field and direction.
    ///
    /// Unknown fields fall back to [`ResourceTrait::default_sort_column`] and
    /// anything other than `desc` sorts ascending, so pagination never fails
    /// on a bad query string.
    fn sort_by(field: &str, direction: &str) -> (Self::Column, Order)
    where
        Self::Column: FromStr,
    {
        let column =
            Self::Column::from_str(field).unwrap_or_else(|_| Self::default_sort_column());
        let order = match direction {
            "desc" => Order::Desc,
            _ => Order::Asc,
        };
        (column, order)
    }

    /// Ids eligible for a bulk action once the protected ones are removed.
    ///
    /// Callers pass the acting user's own id in `omit_ids` so that a bulk
    /// user delete can never remove the account performing it.
    fn bulk_action_ids(ids: Vec<i32>, omit_ids: &[i32]) -> Vec<i32> {
        ids.into_iter().filter(|id| !omit_ids.contains(id)).collect()
    }

    /// Delete every row whose primary key is in `ids` with a single
    /// statement, returning the number of rows removed.
    async fn bulk_delete<C>(db: &C, ids: Vec<i32>) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = Self::delete_many()
            .filter(Self::id_column().is_in(ids))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Active models whose tables carry the shared timestamp columns.
pub trait Timestamped: ActiveModelTrait {
    fn set_created_at(&mut self, at: DateTimeUtc);
    fn set_updated_at(&mut self, at: DateTimeUtc);
    fn created_at_unset(&self) -> bool;

    /// Stamp the row ahead of a save. Inserts receive `created_at` unless
    /// the caller already chose one; every save refreshes `updated_at`.
    fn touch(mut self, insert: bool) -> Self
    where
        Self: Sized,
    {
        let now = chrono::Utc::now();
        if insert && self.created_at_unset() {
            self.set_created_at(now);
        }
        self.set_updated_at(now);
        self
    }
}
