//! HTTP-level integration tests for the adoption submission workflow:
//! duplicate prevention, attachment validation, photo linkage, and the
//! guaranteed cleanup of staged files.

mod common;

use std::path::Path;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{build_test_app_in, expect_status, post_multipart, Part};
use sqlx::PgPool;

use pawhome_core::types::DbId;
use pawhome_db::models::pet::CreatePet;
use pawhome_db::models::user::CreateUser;
use pawhome_db::repositories::{PetRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: Some("Arthit".to_string()),
            last_name: Some("S".to_string()),
            phone: None,
            email: Some("arthit@example.com".to_string()),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_pet(pool: &PgPool) -> DbId {
    PetRepo::create(
        pool,
        &CreatePet {
            name_en: "Mali".to_string(),
            name_th: "มะลิ".to_string(),
            breed_en: None,
            breed_th: None,
            description_en: None,
            description_th: None,
            birth_date: Utc::now() - Duration::days(400),
            color: "white".to_string(),
            gender: "FEMALE".to_string(),
            species: "CAT".to_string(),
            medical_history: None,
            is_vaccinated: None,
            is_neutered: None,
            weight: Some(4.0),
        },
        None,
    )
    .await
    .unwrap()
    .id
}

/// Baseline form fields for a submission, without files.
fn form_fields(user_id: &str, pet_id: &str) -> Vec<Part<'static>> {
    let user_id: &'static str = Box::leak(user_id.to_string().into_boxed_str());
    let pet_id: &'static str = Box::leak(pet_id.to_string().into_boxed_str());
    vec![
        Part::Text("user_id", user_id),
        Part::Text("pet_id", pet_id),
        Part::Text("first_name", "Somsak"),
        Part::Text("last_name", "Updated"),
        Part::Text("phone", "0899999999"),
        Part::Text("address", "99 Sukhumvit Rd, Bangkok"),
        Part::Text("career", "engineer"),
        Part::Text("salary", "45000"),
        Part::Text("current_pet_count", "1"),
        Part::Text("family_member_count", "3"),
        Part::Text("family_always_home", "false"),
        Part::Text("alone_hours", "6"),
        Part::Text("housing_type", "HOUSE"),
        Part::Text("has_garden", "true"),
        Part::Text("has_fence", "true"),
        Part::Text("can_walk_dog", "true"),
        Part::Text("delivery_type", "PICKUP"),
        Part::Text("why", "we have room for one more"),
    ]
}

fn with_photos(mut parts: Vec<Part<'static>>, n: usize) -> Vec<Part<'static>> {
    for i in 0..n {
        let name: &'static str = Box::leak(format!("home_{i}.jpg").into_boxed_str());
        parts.push(Part::File("images", name, b"fake jpeg bytes"));
    }
    parts
}

/// Number of files currently staged under the scratch upload dir.
fn staged_count(scratch: &Path) -> usize {
    match std::fs::read_dir(scratch.join("uploads")) {
        Ok(entries) => entries.count(),
        Err(_) => 0, // directory not created yet: nothing staged
    }
}

async fn request_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM adoption_requests")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_creates_request_photos_and_cleans_temp_files(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let app = build_test_app_in(pool.clone(), scratch.path());
    let parts = with_photos(form_fields(&user_id.to_string(), &pet_id.to_string()), 3);
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["request"]["user_id"], user_id);
    assert_eq!(json["request"]["pet_id"], pet_id);
    assert_eq!(json["home_images"].as_array().unwrap().len(), 3);
    let request_id = json["request"]["id"].as_i64().unwrap();
    for image in json["home_images"].as_array().unwrap() {
        assert_eq!(image["adoption_request_id"], request_id);
        assert!(image["url"].as_str().unwrap().starts_with("/media/"));
    }

    // Contact fields were overwritten with the submitted values.
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Somsak"));
    assert_eq!(user.phone.as_deref(), Some("0899999999"));

    // Every staged temp file is gone after the call returns.
    assert_eq!(staged_count(scratch.path()), 0);
}

// ---------------------------------------------------------------------------
// Duplicate prevention
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn second_submission_for_same_pair_is_a_conflict(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let parts = with_photos(form_fields(&user_id.to_string(), &pet_id.to_string()), 1);

    let app = build_test_app_in(pool.clone(), scratch.path());
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = build_test_app_in(pool.clone(), scratch.path());
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");

    assert_eq!(request_count(&pool).await, 1, "no second row was created");
    assert_eq!(staged_count(scratch.path()), 0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn zero_attachments_is_rejected_before_any_write(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let app = build_test_app_in(pool.clone(), scratch.path());
    let parts = form_fields(&user_id.to_string(), &pet_id.to_string());
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_eq!(request_count(&pool).await, 0, "no row may be created");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_user_id_is_a_validation_error(pool: PgPool) {
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let app = build_test_app_in(pool.clone(), scratch.path());
    let parts = with_photos(form_fields("abc", &pet_id.to_string()), 1);
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_eq!(staged_count(scratch.path()), 0, "staged files were cleaned");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_address_is_a_validation_error(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let user_id_str: &'static str = Box::leak(user_id.to_string().into_boxed_str());
    let pet_id_str: &'static str = Box::leak(pet_id.to_string().into_boxed_str());
    let parts = with_photos(
        vec![
            Part::Text("user_id", user_id_str),
            Part::Text("pet_id", pet_id_str),
        ],
        1,
    );

    let app = build_test_app_in(pool.clone(), scratch.path());
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(request_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Referenced entities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_is_404_and_temp_files_are_cleaned(pool: PgPool) {
    let pet_id = seed_pet(&pool).await;
    let scratch = tempfile::tempdir().unwrap();

    let app = build_test_app_in(pool.clone(), scratch.path());
    let parts = with_photos(form_fields("999999", &pet_id.to_string()), 2);
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");

    assert_eq!(request_count(&pool).await, 0);
    assert_eq!(staged_count(scratch.path()), 0, "staged files were cleaned");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn soft_deleted_pet_is_404(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let pet_id = seed_pet(&pool).await;
    PetRepo::soft_delete(&pool, pet_id).await.unwrap();
    let scratch = tempfile::tempdir().unwrap();

    let app = build_test_app_in(pool.clone(), scratch.path());
    let parts = with_photos(form_fields(&user_id.to_string(), &pet_id.to_string()), 1);
    let response = post_multipart(app, "/api/v1/adoptions", &parts).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(request_count(&pool).await, 0);
}
