use ::entity::resource::ResourceTrait;
use ::entity::{customer_machine, machine_model, operating_time, rotation, user};
use sea_orm::prelude::Date;
use sea_orm::*;

pub struct Query;

impl Query {
    pub async fn find_user_by_id(db: &DbConn, id: i32) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_user_by_email(
        db: &DbConn,
        email: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await
    }

    /// Every user holding the customer role, disabled accounts included.
    pub async fn all_customers(db: &DbConn) -> Result<Vec<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::Client))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
    }

    /// One page of users plus the total page count. `page` starts at 1.
    pub async fn users_in_page(
        db: &DbConn,
        page: u64,
        per_page: u64,
        sort: &str,
        direction: &str,
    ) -> Result<(Vec<user::Model>, u64), DbErr> {
        let (column, order) = user::Entity::sort_by(sort, direction);
        let paginator = user::Entity::find()
            .order_by(column, order)
            .paginate(db, per_page);
        let num_pages = paginator.num_pages().await?;

        paginator
            .fetch_page(page - 1)
            .await
            .map(|users| (users, num_pages))
    }

    pub async fn find_machine_model_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<machine_model::Model>, DbErr> {
        machine_model::Entity::find_by_id(id).one(db).await
    }

    pub async fn all_machine_models(db: &DbConn) -> Result<Vec<machine_model::Model>, DbErr> {
        machine_model::Entity::find()
            .order_by_asc(machine_model::Column::Name)
            .all(db)
            .await
    }

    pub async fn find_customer_machine_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<customer_machine::Model>, DbErr> {
        customer_machine::Entity::find_by_id(id).one(db).await
    }

    pub async fn all_customer_machines(
        db: &DbConn,
    ) -> Result<Vec<customer_machine::Model>, DbErr> {
        customer_machine::Entity::find()
            .order_by_asc(customer_machine::Column::Id)
            .all(db)
            .await
    }

    /// Machines owned by one customer.
    pub async fn machines_of_customer(
        db: &DbConn,
        customer_id: i32,
    ) -> Result<Vec<customer_machine::Model>, DbErr> {
        customer_machine::Entity::find()
            .filter(customer_machine::Column::CustomerId.eq(customer_id))
            .order_by_asc(customer_machine::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_rotation_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<rotation::Model>, DbErr> {
        rotation::Entity::find_by_id(id).one(db).await
    }

    /// One page of a machine's rotation history. `page` starts at 1.
    pub async fn rotations_in_page(
        db: &DbConn,
        customer_machine_id: i32,
        page: u64,
        per_page: u64,
        sort: &str,
        direction: &str,
    ) -> Result<(Vec<rotation::Model>, u64), DbErr> {
        let (column, order) = rotation::Entity::sort_by(sort, direction);
        let paginator = rotation::Entity::find()
            .filter(rotation::Column::CustomerMachineId.eq(customer_machine_id))
            .order_by(column, order)
            .paginate(db, per_page);
        let num_pages = paginator.num_pages().await?;

        paginator
            .fetch_page(page - 1)
            .await
            .map(|rotations| (rotations, num_pages))
    }

    /// Whether a rotation row already exists for this machine and date.
    pub async fn rotation_exists(
        db: &DbConn,
        customer_machine_id: i32,
        date: Date,
    ) -> Result<bool, DbErr> {
        rotation::Entity::find()
            .filter(rotation::Column::CustomerMachineId.eq(customer_machine_id))
            .filter(rotation::Column::Date.eq(date))
            .one(db)
            .await
            .map(|rotation| rotation.is_some())
    }

    pub async fn find_operating_time_by_id(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<operating_time::Model>, DbErr> {
        operating_time::Entity::find_by_id(id).one(db).await
    }

    /// One page of a machine's operating time history. `page` starts at 1.
    pub async fn operating_times_in_page(
        db: &DbConn,
        customer_machine_id: i32,
        page: u64,
        per_page: u64,
        sort: &str,
        direction: &str,
    ) -> Result<(Vec<operating_time::Model>, u64), DbErr> {
        let (column, order) = operating_time::Entity::sort_by(sort, direction);
        let paginator = operating_time::Entity::find()
            .filter(operating_time::Column::CustomerMachineId.eq(customer_machine_id))
            .order_by(column, order)
            .paginate(db, per_page);
        let num_pages = paginator.num_pages().await?;

        paginator
            .fetch_page(page - 1)
            .await
            .map(|rows| (rows, num_pages))
    }

    /// Whether an operating time row already exists for this machine and date.
    pub async fn operating_time_exists(
        db: &DbConn,
        customer_machine_id: i32,
        date: Date,
    ) -> Result<bool, DbErr> {
        operating_time::Entity::find()
            .filter(operating_time::Column::CustomerMachineId.eq(customer_machine_id))
            .filter(operating_time::Column::Date.eq(date))
            .one(db)
            .await
            .map(|row| row.is_some())
    }
}
