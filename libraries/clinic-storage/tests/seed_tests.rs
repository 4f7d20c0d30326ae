use clinic_core::Role;
use clinic_storage::seed::{self, SeedOptions};
use clinic_storage::{doctors, specialties, users};

use test_helpers::{TestDb, TEST_COST};

#[tokio::test]
async fn test_seed_creates_admin_catalogue_and_sample_patient() {
    let db = TestDb::seeded().await;

    let admin = users::find_credentials(db.pool(), seed::ADMIN_USERNAME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.user.role, Role::Admin);
    assert_eq!(admin.user.name, "Administrador");
    // Stored as a bcrypt hash, never the plain password
    assert_ne!(admin.password_hash, seed::ADMIN_PASSWORD);

    let names: Vec<String> = specialties::get_all(db.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(
        names,
        vec!["Cardiología", "Dermatología", "Oftalmología", "Pediatría"]
    );

    let garcia = doctors::find_by_name(db.pool(), "Dr. García")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(garcia.specialty_name, "Cardiología");

    let patient = users::find_patient_by_name(db.pool(), "Paciente Prueba")
        .await
        .unwrap();
    assert!(patient.is_some());
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = TestDb::seeded().await;
    let options = SeedOptions {
        sample_patient: true,
        bcrypt_cost: TEST_COST,
    };

    seed::run(db.pool(), &options).await.unwrap();
    seed::run(db.pool(), &options).await.unwrap();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .unwrap();
    let doctors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM doctors")
        .fetch_one(db.pool())
        .await
        .unwrap();
    let specialties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM specialties")
        .fetch_one(db.pool())
        .await
        .unwrap();

    assert_eq!(users, 2);
    assert_eq!(doctors, 4);
    assert_eq!(specialties, 4);
}

#[tokio::test]
async fn test_seed_without_sample_patient() {
    let db = TestDb::new().await;
    seed::run(
        db.pool(),
        &SeedOptions {
            sample_patient: false,
            bcrypt_cost: TEST_COST,
        },
    )
    .await
    .unwrap();

    assert!(users::get_patients(db.pool()).await.unwrap().is_empty());
    assert!(users::username_exists(db.pool(), seed::ADMIN_USERNAME)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_doctors_by_specialty() {
    let db = TestDb::seeded().await;

    let cardiology: Vec<String> = doctors::get_by_specialty(db.pool(), "Cardiología")
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(cardiology, vec!["Dr. García", "Dra. Rodríguez"]);

    // Seeded specialty without doctors
    assert!(doctors::get_by_specialty(db.pool(), "Oftalmología")
        .await
        .unwrap()
        .is_empty());

    assert_eq!(doctors::get_all(db.pool()).await.unwrap().len(), 4);
}
