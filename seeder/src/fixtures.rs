//! Development and test fixtures.
//!
//! Seeds the environment the integration tests lean on: five users (one
//! administrator, whose credentials can be overridden through
//! `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`), five machine models, five
//! customer machines spread over the customer accounts, and ten rotation
//! plus ten operating time rows per machine, each on a distinct random date
//! in the current year.

use std::env;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use entity::{customer_machine, machine_model, operating_time, rotation, user};
use machinepark_service::auth;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@machinepark.test";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin-password";

/// Password shared by the non-admin fixture users.
pub const SEED_PASSWORD: &str = "password";

pub async fn seed_all<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let users = seed_users(db).await?;
    let models = seed_machine_models(db).await?;
    let machines = seed_customer_machines(db, &users, &models).await?;
    seed_rotations(db, &machines).await?;
    seed_operating_times(db, &machines).await?;
    Ok(())
}

/// Remove everything [`seed_all`] inserted, children first.
pub async fn unseed_all<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    rotation::Entity::delete_many().exec(db).await?;
    operating_time::Entity::delete_many().exec(db).await?;
    customer_machine::Entity::delete_many().exec(db).await?;
    machine_model::Entity::delete_many().exec(db).await?;
    user::Entity::delete_many().exec(db).await?;
    Ok(())
}

pub async fn seed_users<C>(db: &C) -> Result<Vec<user::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let admin_email =
        env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_owned());
    let admin_password =
        env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_owned());

    let mut users = Vec::with_capacity(5);
    users.push(
        insert_user(
            db,
            &admin_email,
            &admin_password,
            user::Role::Admin,
            true,
            "管理者",
            "カンリシャ",
        )
        .await?,
    );

    for (email, role, is_active, name, name_kana) in [
        (
            "client@machinepark.test",
            user::Role::Client,
            true,
            "遠藤工業",
            "エンドウコウギョウ",
        ),
        (
            "client2@machinepark.test",
            user::Role::Client,
            true,
            "山田製作所",
            "ヤマダセイサクショ",
        ),
        (
            "iot@machinepark.test",
            user::Role::Iot,
            true,
            "IoT Gateway",
            "ゲートウェイ",
        ),
        (
            "disabled@machinepark.test",
            user::Role::Client,
            false,
            "休眠顧客",
            "キュウミンコキャク",
        ),
    ] {
        users.push(insert_user(db, email, SEED_PASSWORD, role, is_active, name, name_kana).await?);
    }

    Ok(users)
}

async fn insert_user<C>(
    db: &C,
    email: &str,
    password: &str,
    role: user::Role,
    is_active: bool,
    name: &str,
    name_kana: &str,
) -> Result<user::Model, DbErr>
where
    C: ConnectionTrait,
{
    user::ActiveModel {
        email: Set(email.to_owned()),
        password: Set(hash(password)?),
        role: Set(role),
        is_active: Set(is_active),
        name: Set(name.to_owned()),
        name_kana: Set(name_kana.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn seed_machine_models<C>(db: &C) -> Result<Vec<machine_model::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let mut models = Vec::with_capacity(5);
    for i in 0..5 {
        let model = machine_model::ActiveModel {
            name: Set(format!("new_model_{i}")),
            ..Default::default()
        }
        .insert(db)
        .await?;
        models.push(model);
    }
    Ok(models)
}

/// Five machines, each assigned a random customer account and model.
pub async fn seed_customer_machines<C>(
    db: &C,
    users: &[user::Model],
    models: &[machine_model::Model],
) -> Result<Vec<customer_machine::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let customers: Vec<&user::Model> = users
        .iter()
        .filter(|user| user.role == user::Role::Client)
        .collect();

    let mut rng = fastrand::Rng::new();
    let mut machines = Vec::with_capacity(5);
    for i in 0..5 {
        let customer = customers[rng.usize(0..customers.len())];
        let model = &models[rng.usize(0..models.len())];
        let machine = customer_machine::ActiveModel {
            code: Set(format!("new_model_{i}")),
            customer_id: Set(customer.id),
            model_id: Set(model.id),
            ..Default::default()
        }
        .insert(db)
        .await?;
        machines.push(machine);
    }
    Ok(machines)
}

/// Ten rotation rows per machine.
///
/// Dates are drawn at random from the current year and re-drawn while a row
/// for the same machine and date already exists, mirroring how the API
/// enforces the one-row-per-day rule.
pub async fn seed_rotations<C>(db: &C, machines: &[customer_machine::Model]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let mut rng = fastrand::Rng::new();
    for machine in machines {
        for _ in 0..10 {
            let date = free_rotation_date(db, machine.id, &mut rng).await?;
            rotation::ActiveModel {
                date: Set(date),
                shaft_a_normal_rotation: Set(rng.i32(200..600)),
                shaft_a_reverse_rotation: Set(rng.i32(200..600)),
                customer_machine_id: Set(machine.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Ten operating time rows per machine, same unique-date rule as
/// [`seed_rotations`].
pub async fn seed_operating_times<C>(
    db: &C,
    machines: &[customer_machine::Model],
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let mut rng = fastrand::Rng::new();
    for machine in machines {
        for _ in 0..10 {
            let date = free_operating_time_date(db, machine.id, &mut rng).await?;
            operating_time::ActiveModel {
                date: Set(date),
                duration: Set(rng.i32(10_000..50_000)),
                customer_machine_id: Set(machine.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

async fn free_rotation_date<C>(
    db: &C,
    customer_machine_id: i32,
    rng: &mut fastrand::Rng,
) -> Result<NaiveDate, DbErr>
where
    C: ConnectionTrait,
{
    loop {
        let date = random_date_this_year(rng);
        let taken = rotation::Entity::find()
            .filter(rotation::Column::CustomerMachineId.eq(customer_machine_id))
            .filter(rotation::Column::Date.eq(date))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(date);
        }
    }
}

async fn free_operating_time_date<C>(
    db: &C,
    customer_machine_id: i32,
    rng: &mut fastrand::Rng,
) -> Result<NaiveDate, DbErr>
where
    C: ConnectionTrait,
{
    loop {
        let date = random_date_this_year(rng);
        let taken = operating_time::Entity::find()
            .filter(operating_time::Column::CustomerMachineId.eq(customer_machine_id))
            .filter(operating_time::Column::Date.eq(date))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(date);
        }
    }
}

/// A date between January 1st of the current year and today, inclusive.
fn random_date_this_year(rng: &mut fastrand::Rng) -> NaiveDate {
    let today = Utc::now().date_naive();
    let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).expect("January 1st is always valid");
    let span = (today - start).num_days();
    start + Duration::days(rng.i64(0..=span))
}

fn hash(password: &str) -> Result<String, DbErr> {
    auth::hash_password(password).map_err(|err| DbErr::Custom(err.to_string()))
}
