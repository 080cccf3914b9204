use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Utc};
use entity::{customer_machine, machine_model, operating_time, rotation, user};
use machinepark_service::auth;
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use seeder::{Migrator, MigratorTrait};

async fn seeded_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

#[tokio::test]
async fn seeds_expected_row_counts() {
    let db = seeded_db().await;

    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(machine_model::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(
        customer_machine::Entity::find().count(&db).await.unwrap(),
        5
    );
    assert_eq!(rotation::Entity::find().count(&db).await.unwrap(), 50);
    assert_eq!(operating_time::Entity::find().count(&db).await.unwrap(), 50);
}

#[tokio::test]
async fn seeding_twice_does_not_duplicate() {
    let db = seeded_db().await;
    Migrator::up(&db, None).await.unwrap();

    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(rotation::Entity::find().count(&db).await.unwrap(), 50);
}

#[tokio::test]
async fn admin_is_seeded_with_a_verifiable_password() {
    let db = seeded_db().await;

    let admin = user::Entity::find()
        .filter(user::Column::Email.eq(seeder::fixtures::DEFAULT_ADMIN_EMAIL))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(admin.role, user::Role::Admin);
    assert!(admin.is_active);
    assert!(auth::verify_password(
        seeder::fixtures::DEFAULT_ADMIN_PASSWORD,
        &admin.password
    ));
}

#[tokio::test]
async fn one_disabled_client_is_seeded() {
    let db = seeded_db().await;

    let disabled = user::Entity::find()
        .filter(user::Column::IsActive.eq(false))
        .all(&db)
        .await
        .unwrap();

    assert_eq!(disabled.len(), 1);
    assert_eq!(disabled[0].email, "disabled@machinepark.test");
    assert_eq!(disabled[0].role, user::Role::Client);
}

#[tokio::test]
async fn machines_belong_to_client_accounts_and_real_models() {
    let db = seeded_db().await;

    let client_ids: HashSet<i32> = user::Entity::find()
        .filter(user::Column::Role.eq(user::Role::Client))
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect();
    let model_ids: HashSet<i32> = machine_model::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|model| model.id)
        .collect();

    for machine in customer_machine::Entity::find().all(&db).await.unwrap() {
        assert!(client_ids.contains(&machine.customer_id));
        assert!(model_ids.contains(&machine.model_id));
    }
}

#[tokio::test]
async fn measurement_dates_are_unique_per_machine_and_current_year() {
    let db = seeded_db().await;

    let today = Utc::now().date_naive();
    let january_first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();

    let mut rotation_dates: HashMap<i32, HashSet<NaiveDate>> = HashMap::new();
    for row in rotation::Entity::find().all(&db).await.unwrap() {
        assert!(row.date >= january_first && row.date <= today);
        assert!((200..600).contains(&row.shaft_a_normal_rotation));
        assert!((200..600).contains(&row.shaft_a_reverse_rotation));
        assert!(
            rotation_dates
                .entry(row.customer_machine_id)
                .or_default()
                .insert(row.date),
            "duplicate rotation date for one machine"
        );
    }
    assert!(rotation_dates.values().all(|dates| dates.len() == 10));

    let mut operating_dates: HashMap<i32, HashSet<NaiveDate>> = HashMap::new();
    for row in operating_time::Entity::find().all(&db).await.unwrap() {
        assert!(row.date >= january_first && row.date <= today);
        assert!((10_000..50_000).contains(&row.duration));
        assert!(
            operating_dates
                .entry(row.customer_machine_id)
                .or_default()
                .insert(row.date),
            "duplicate operating time date for one machine"
        );
    }
    assert!(operating_dates.values().all(|dates| dates.len() == 10));
}

#[tokio::test]
async fn down_removes_fixture_rows() {
    let db = seeded_db().await;

    // Roll back just the seed step.
    Migrator::down(&db, Some(1)).await.unwrap();

    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(rotation::Entity::find().count(&db).await.unwrap(), 0);
}
