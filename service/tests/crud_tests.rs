use chrono::NaiveDate;
use entity::{customer_machine, machine_model, operating_time, revoked_token, rotation, user};
use machinepark_service::{
    sea_orm::{ConnectionTrait, Database, DbConn, Schema},
    Mutation, NewCustomerMachine, NewMachineModel, NewOperatingTime, NewRotation, NewUser,
    OperatingTimePatch, Query, RotationPatch, ServiceError, UserPatch,
};

async fn setup() -> DbConn {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    for statement in [
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(machine_model::Entity),
        schema.create_table_from_entity(customer_machine::Entity),
        schema.create_table_from_entity(rotation::Entity),
        schema.create_table_from_entity(operating_time::Entity),
        schema.create_table_from_entity(revoked_token::Entity),
    ] {
        db.execute(backend.build(&statement)).await.unwrap();
    }
    db
}

fn new_user(email: &str, role: user::Role) -> NewUser {
    NewUser {
        email: email.to_owned(),
        password: "password".to_owned(),
        role,
        is_active: true,
        name: "Some User".to_owned(),
        name_kana: "ユーザー".to_owned(),
    }
}

async fn machine_fixture(db: &DbConn, tag: &str) -> customer_machine::Model {
    let owner = Mutation::create_user(
        db,
        new_user(&format!("owner-{tag}@example.com"), user::Role::Client),
    )
    .await
    .unwrap();
    let model = Mutation::create_machine_model(
        db,
        NewMachineModel {
            name: "MX-100".to_owned(),
        },
    )
    .await
    .unwrap();
    Mutation::create_customer_machine(
        db,
        NewCustomerMachine {
            code: format!("MX-100-{tag}"),
            customer_id: owner.id,
            model_id: model.id,
        },
    )
    .await
    .unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn create_user_hashes_password_and_stamps_timestamps() {
    let db = setup().await;

    let created = Mutation::create_user(&db, new_user("a@example.com", user::Role::Client))
        .await
        .unwrap();

    assert_eq!(created.email, "a@example.com");
    assert_ne!(created.password, "password");
    assert!(machinepark_service::auth::verify_password(
        "password",
        &created.password
    ));

    let fetched = Query::find_user_by_email(&db, "a@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.id, created.id);
    assert!(fetched.updated_at >= fetched.created_at);
}

#[tokio::test]
async fn update_user_only_touches_patched_fields() {
    let db = setup().await;
    let created = Mutation::create_user(&db, new_user("b@example.com", user::Role::Client))
        .await
        .unwrap();

    let updated = Mutation::update_user(
        &db,
        created.id,
        UserPatch {
            email: Some("b2@example.com".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.email, "b2@example.com");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.password, created.password);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let db = setup().await;
    let err = Mutation::update_user(&db, 4242, UserPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("user")));
}

#[tokio::test]
async fn bulk_delete_users_skips_protected_ids() {
    let db = setup().await;
    let admin = Mutation::create_user(&db, new_user("admin@example.com", user::Role::Admin))
        .await
        .unwrap();
    let one = Mutation::create_user(&db, new_user("one@example.com", user::Role::Client))
        .await
        .unwrap();
    let two = Mutation::create_user(&db, new_user("two@example.com", user::Role::Client))
        .await
        .unwrap();

    let deleted =
        Mutation::bulk_delete_users(&db, vec![admin.id, one.id, two.id], &[admin.id])
            .await
            .unwrap();

    assert_eq!(deleted, 2);
    assert!(Query::find_user_by_id(&db, admin.id)
        .await
        .unwrap()
        .is_some());
    assert!(Query::find_user_by_id(&db, one.id).await.unwrap().is_none());
}

#[tokio::test]
async fn all_customers_excludes_other_roles() {
    let db = setup().await;
    Mutation::create_user(&db, new_user("admin@example.com", user::Role::Admin))
        .await
        .unwrap();
    Mutation::create_user(&db, new_user("c1@example.com", user::Role::Client))
        .await
        .unwrap();
    Mutation::create_user(&db, new_user("gw@example.com", user::Role::Iot))
        .await
        .unwrap();

    let customers = Query::all_customers(&db).await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].email, "c1@example.com");
}

#[tokio::test]
async fn users_in_page_honors_sort_and_survives_bad_params() {
    let db = setup().await;
    for email in ["c@example.com", "a@example.com", "b@example.com"] {
        Mutation::create_user(&db, new_user(email, user::Role::Client))
            .await
            .unwrap();
    }

    let (users, num_pages) = Query::users_in_page(&db, 1, 10, "email", "desc")
        .await
        .unwrap();
    assert_eq!(num_pages, 1);
    assert_eq!(users[0].email, "c@example.com");

    // Bogus sort input falls back instead of failing.
    let (users, _) = Query::users_in_page(&db, 1, 10, "no_such_field", "sideways")
        .await
        .unwrap();
    assert_eq!(users.len(), 3);
}

#[tokio::test]
async fn machine_model_crud_round_trip() {
    let db = setup().await;

    let created = Mutation::create_machine_model(
        &db,
        NewMachineModel {
            name: "MX-100".to_owned(),
        },
    )
    .await
    .unwrap();

    let updated = Mutation::update_machine_model(
        &db,
        created.id,
        machinepark_service::MachineModelPatch {
            name: Some("MX-200".to_owned()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "MX-200");

    Mutation::delete_machine_model(&db, created.id).await.unwrap();
    assert!(Query::find_machine_model_by_id(&db, created.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_rotation_for_same_day_is_rejected() {
    let db = setup().await;
    let machine = machine_fixture(&db, "rot").await;

    let first = NewRotation {
        customer_machine_id: machine.id,
        date: date(2024, 7, 1),
        shaft_a_normal_rotation: 250,
        shaft_a_reverse_rotation: 300,
    };
    Mutation::create_rotation(&db, first.clone()).await.unwrap();

    let err = Mutation::create_rotation(&db, first).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DuplicateMeasurement { kind: "rotation", .. }
    ));

    // A different day on the same machine is fine.
    Mutation::create_rotation(
        &db,
        NewRotation {
            customer_machine_id: machine.id,
            date: date(2024, 7, 2),
            shaft_a_normal_rotation: 250,
            shaft_a_reverse_rotation: 300,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn duplicate_operating_time_for_same_day_is_rejected() {
    let db = setup().await;
    let machine = machine_fixture(&db, "op").await;

    let first = NewOperatingTime {
        customer_machine_id: machine.id,
        date: date(2024, 7, 1),
        duration: 12_000,
    };
    Mutation::create_operating_time(&db, first.clone())
        .await
        .unwrap();

    let err = Mutation::create_operating_time(&db, first)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DuplicateMeasurement {
            kind: "operating time",
            ..
        }
    ));
}

#[tokio::test]
async fn rotations_paginate_per_machine_and_sort_by_date() {
    let db = setup().await;
    let machine = machine_fixture(&db, "page-a").await;
    let other = machine_fixture(&db, "page-b").await;

    for day in 1..=3 {
        Mutation::create_rotation(
            &db,
            NewRotation {
                customer_machine_id: machine.id,
                date: date(2024, 7, day),
                shaft_a_normal_rotation: 200 + day as i32,
                shaft_a_reverse_rotation: 400,
            },
        )
        .await
        .unwrap();
    }
    Mutation::create_rotation(
        &db,
        NewRotation {
            customer_machine_id: other.id,
            date: date(2024, 7, 1),
            shaft_a_normal_rotation: 500,
            shaft_a_reverse_rotation: 500,
        },
    )
    .await
    .unwrap();

    let (rotations, num_pages) =
        Query::rotations_in_page(&db, machine.id, 1, 2, "date", "desc")
            .await
            .unwrap();
    assert_eq!(num_pages, 2);
    assert_eq!(rotations.len(), 2);
    assert_eq!(rotations[0].date, date(2024, 7, 3));
    assert!(rotations.iter().all(|r| r.customer_machine_id == machine.id));
}

#[tokio::test]
async fn bulk_delete_machine_models_reports_the_count() {
    let db = setup().await;
    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        let model = Mutation::create_machine_model(
            &db,
            NewMachineModel {
                name: name.to_owned(),
            },
        )
        .await
        .unwrap();
        ids.push(model.id);
    }

    let deleted = Mutation::bulk_delete_machine_models(&db, ids[..2].to_vec())
        .await
        .unwrap();

    assert_eq!(deleted, 2);
    assert!(Query::find_machine_model_by_id(&db, ids[2])
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn rotations_can_be_corrected_but_not_onto_a_taken_date() {
    let db = setup().await;
    let machine = machine_fixture(&db, "fix").await;
    let first = Mutation::create_rotation(
        &db,
        NewRotation {
            customer_machine_id: machine.id,
            date: date(2024, 7, 1),
            shaft_a_normal_rotation: 250,
            shaft_a_reverse_rotation: 300,
        },
    )
    .await
    .unwrap();
    Mutation::create_rotation(
        &db,
        NewRotation {
            customer_machine_id: machine.id,
            date: date(2024, 7, 2),
            shaft_a_normal_rotation: 260,
            shaft_a_reverse_rotation: 310,
        },
    )
    .await
    .unwrap();

    // Counter-only fixes keep the date and pass the duplicate check.
    let updated = Mutation::update_rotation(
        &db,
        first.id,
        RotationPatch {
            shaft_a_normal_rotation: Some(555),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.shaft_a_normal_rotation, 555);
    assert_eq!(updated.date, date(2024, 7, 1));

    let err = Mutation::update_rotation(
        &db,
        first.id,
        RotationPatch {
            date: Some(date(2024, 7, 2)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DuplicateMeasurement { kind: "rotation", .. }
    ));

    let moved = Mutation::update_rotation(
        &db,
        first.id,
        RotationPatch {
            date: Some(date(2024, 7, 3)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.date, date(2024, 7, 3));

    Mutation::delete_rotation(&db, first.id).await.unwrap();
    assert!(Query::find_rotation_by_id(&db, first.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn operating_times_can_be_corrected_and_removed() {
    let db = setup().await;
    let machine = machine_fixture(&db, "fix-op").await;
    let row = Mutation::create_operating_time(
        &db,
        NewOperatingTime {
            customer_machine_id: machine.id,
            date: date(2024, 7, 1),
            duration: 12_000,
        },
    )
    .await
    .unwrap();

    let updated = Mutation::update_operating_time(
        &db,
        row.id,
        OperatingTimePatch {
            duration: Some(18_000),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.duration, 18_000);

    Mutation::delete_operating_time(&db, row.id).await.unwrap();
    assert!(Query::find_operating_time_by_id(&db, row.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_machine_cascades_to_measurements() {
    let db = setup().await;
    let machine = machine_fixture(&db, "cascade").await;
    Mutation::create_operating_time(
        &db,
        NewOperatingTime {
            customer_machine_id: machine.id,
            date: date(2024, 7, 1),
            duration: 20_000,
        },
    )
    .await
    .unwrap();

    Mutation::delete_customer_machine(&db, machine.id)
        .await
        .unwrap();

    assert!(!Query::operating_time_exists(&db, machine.id, date(2024, 7, 1))
        .await
        .unwrap());
}
