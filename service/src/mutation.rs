use ::entity::resource::ResourceTrait;
use ::entity::{customer_machine, machine_model, operating_time, rotation, user};
use sea_orm::prelude::Date;
use sea_orm::*;
use serde::Deserialize;

use crate::{auth, Query, ServiceError};

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: user::Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub name: String,
    pub name_kana: String,
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<user::Role>,
    pub is_active: Option<bool>,
    pub name: Option<String>,
    pub name_kana: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMachineModel {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MachineModelPatch {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomerMachine {
    pub code: String,
    pub customer_id: i32,
    pub model_id: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerMachinePatch {
    pub code: Option<String>,
    pub customer_id: Option<i32>,
    pub model_id: Option<i32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRotation {
    pub customer_machine_id: i32,
    pub date: Date,
    pub shaft_a_normal_rotation: i32,
    pub shaft_a_reverse_rotation: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RotationPatch {
    pub date: Option<Date>,
    pub shaft_a_normal_rotation: Option<i32>,
    pub shaft_a_reverse_rotation: Option<i32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOperatingTime {
    pub customer_machine_id: i32,
    pub date: Date,
    pub duration: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OperatingTimePatch {
    pub date: Option<Date>,
    pub duration: Option<i32>,
}

pub struct Mutation;

impl Mutation {
    pub async fn create_user(db: &DbConn, data: NewUser) -> Result<user::Model, ServiceError> {
        let password = auth::hash_password(&data.password)?;
        let user = user::ActiveModel {
            email: Set(data.email),
            password: Set(password),
            role: Set(data.role),
            is_active: Set(data.is_active),
            name: Set(data.name),
            name_kana: Set(data.name_kana),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(user)
    }

    /// Apply the provided fields to an existing user, leaving the rest
    /// untouched. A new password is hashed before it is stored.
    pub async fn update_user(
        db: &DbConn,
        id: i32,
        patch: UserPatch,
    ) -> Result<user::Model, ServiceError> {
        let user = Query::find_user_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;
        let mut user: user::ActiveModel = user.into();

        if let Some(email) = patch.email {
            user.email = Set(email);
        }
        if let Some(password) = patch.password {
            user.password = Set(auth::hash_password(&password)?);
        }
        if let Some(role) = patch.role {
            user.role = Set(role);
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = Set(is_active);
        }
        if let Some(name) = patch.name {
            user.name = Set(name);
        }
        if let Some(name_kana) = patch.name_kana {
            user.name_kana = Set(name_kana);
        }

        Ok(user.update(db).await?)
    }

    pub async fn delete_user(db: &DbConn, id: i32) -> Result<DeleteResult, ServiceError> {
        let user: user::ActiveModel = Query::find_user_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?
            .into();
        Ok(user.delete(db).await?)
    }

    /// Delete the given users in one statement, never touching the ids in
    /// `protected` (typically the administrator performing the request).
    /// Returns how many rows were removed.
    pub async fn bulk_delete_users(
        db: &DbConn,
        ids: Vec<i32>,
        protected: &[i32],
    ) -> Result<u64, ServiceError> {
        let ids = user::Entity::bulk_action_ids(ids, protected);
        let deleted = user::Entity::bulk_delete(db, ids).await?;
        tracing::info!(deleted, "bulk user delete");
        Ok(deleted)
    }

    pub async fn create_machine_model(
        db: &DbConn,
        data: NewMachineModel,
    ) -> Result<machine_model::Model, ServiceError> {
        let model = machine_model::ActiveModel {
            name: Set(data.name),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(model)
    }

    pub async fn update_machine_model(
        db: &DbConn,
        id: i32,
        patch: MachineModelPatch,
    ) -> Result<machine_model::Model, ServiceError> {
        let model = Query::find_machine_model_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("machine model"))?;
        let mut model: machine_model::ActiveModel = model.into();

        if let Some(name) = patch.name {
            model.name = Set(name);
        }

        Ok(model.update(db).await?)
    }

    pub async fn delete_machine_model(
        db: &DbConn,
        id: i32,
    ) -> Result<DeleteResult, ServiceError> {
        let model: machine_model::ActiveModel = Query::find_machine_model_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("machine model"))?
            .into();
        Ok(model.delete(db).await?)
    }

    pub async fn bulk_delete_machine_models(
        db: &DbConn,
        ids: Vec<i32>,
    ) -> Result<u64, ServiceError> {
        let deleted = machine_model::Entity::bulk_delete(db, ids).await?;
        tracing::info!(deleted, "bulk machine model delete");
        Ok(deleted)
    }

    pub async fn create_customer_machine(
        db: &DbConn,
        data: NewCustomerMachine,
    ) -> Result<customer_machine::Model, ServiceError> {
        let machine = customer_machine::ActiveModel {
            code: Set(data.code),
            customer_id: Set(data.customer_id),
            model_id: Set(data.model_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(machine)
    }

    pub async fn update_customer_machine(
        db: &DbConn,
        id: i32,
        patch: CustomerMachinePatch,
    ) -> Result<customer_machine::Model, ServiceError> {
        let machine = Query::find_customer_machine_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("customer machine"))?;
        let mut machine: customer_machine::ActiveModel = machine.into();

        if let Some(code) = patch.code {
            machine.code = Set(code);
        }
        if let Some(customer_id) = patch.customer_id {
            machine.customer_id = Set(customer_id);
        }
        if let Some(model_id) = patch.model_id {
            machine.model_id = Set(model_id);
        }

        Ok(machine.update(db).await?)
    }

    pub async fn delete_customer_machine(
        db: &DbConn,
        id: i32,
    ) -> Result<DeleteResult, ServiceError> {
        let machine: customer_machine::ActiveModel = Query::find_customer_machine_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("customer machine"))?
            .into();
        Ok(machine.delete(db).await?)
    }

    /// Record a day's rotation counters for a machine.
    ///
    /// Exactly one row may exist per machine and date, so an existence check
    /// runs before the insert and duplicates are rejected.
    pub async fn create_rotation(
        db: &DbConn,
        data: NewRotation,
    ) -> Result<rotation::Model, ServiceError> {
        if Query::rotation_exists(db, data.customer_machine_id, data.date).await? {
            return Err(ServiceError::DuplicateMeasurement {
                kind: "rotation",
                customer_machine_id: data.customer_machine_id,
                date: data.date,
            });
        }

        let rotation = rotation::ActiveModel {
            date: Set(data.date),
            shaft_a_normal_rotation: Set(data.shaft_a_normal_rotation),
            shaft_a_reverse_rotation: Set(data.shaft_a_reverse_rotation),
            customer_machine_id: Set(data.customer_machine_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(rotation)
    }

    /// Correct a recorded rotation row. Moving it to another date re-runs
    /// the one-row-per-day check against that date.
    pub async fn update_rotation(
        db: &DbConn,
        id: i32,
        patch: RotationPatch,
    ) -> Result<rotation::Model, ServiceError> {
        let rotation = Query::find_rotation_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("rotation"))?;

        if let Some(date) = patch.date {
            if date != rotation.date
                && Query::rotation_exists(db, rotation.customer_machine_id, date).await?
            {
                return Err(ServiceError::DuplicateMeasurement {
                    kind: "rotation",
                    customer_machine_id: rotation.customer_machine_id,
                    date,
                });
            }
        }

        let mut rotation: rotation::ActiveModel = rotation.into();
        if let Some(date) = patch.date {
            rotation.date = Set(date);
        }
        if let Some(normal) = patch.shaft_a_normal_rotation {
            rotation.shaft_a_normal_rotation = Set(normal);
        }
        if let Some(reverse) = patch.shaft_a_reverse_rotation {
            rotation.shaft_a_reverse_rotation = Set(reverse);
        }

        Ok(rotation.update(db).await?)
    }

    pub async fn delete_rotation(db: &DbConn, id: i32) -> Result<DeleteResult, ServiceError> {
        let rotation: rotation::ActiveModel = Query::find_rotation_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("rotation"))?
            .into();
        Ok(rotation.delete(db).await?)
    }

    /// Record a day's operating time for a machine. Same duplicate rule as
    /// [`Mutation::create_rotation`].
    pub async fn create_operating_time(
        db: &DbConn,
        data: NewOperatingTime,
    ) -> Result<operating_time::Model, ServiceError> {
        if Query::operating_time_exists(db, data.customer_machine_id, data.date).await? {
            return Err(ServiceError::DuplicateMeasurement {
                kind: "operating time",
                customer_machine_id: data.customer_machine_id,
                date: data.date,
            });
        }

        let row = operating_time::ActiveModel {
            date: Set(data.date),
            duration: Set(data.duration),
            customer_machine_id: Set(data.customer_machine_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(row)
    }

    /// Correct a recorded operating time row, with the same date rule as
    /// [`Mutation::update_rotation`].
    pub async fn update_operating_time(
        db: &DbConn,
        id: i32,
        patch: OperatingTimePatch,
    ) -> Result<operating_time::Model, ServiceError> {
        let row = Query::find_operating_time_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("operating time"))?;

        if let Some(date) = patch.date {
            if date != row.date
                && Query::operating_time_exists(db, row.customer_machine_id, date).await?
            {
                return Err(ServiceError::DuplicateMeasurement {
                    kind: "operating time",
                    customer_machine_id: row.customer_machine_id,
                    date,
                });
            }
        }

        let mut row: operating_time::ActiveModel = row.into();
        if let Some(date) = patch.date {
            row.date = Set(date);
        }
        if let Some(duration) = patch.duration {
            row.duration = Set(duration);
        }

        Ok(row.update(db).await?)
    }

    pub async fn delete_operating_time(
        db: &DbConn,
        id: i32,
    ) -> Result<DeleteResult, ServiceError> {
        let row: operating_time::ActiveModel = Query::find_operating_time_by_id(db, id)
            .await?
            .ok_or(ServiceError::NotFound("operating time"))?
            .into();
        Ok(row.delete(db).await?)
    }
}
