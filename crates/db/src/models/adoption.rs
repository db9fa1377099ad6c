//! Adoption request entity, questionnaire DTO, and home photo rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhome_core::types::{DbId, Timestamp};

/// Full adoption request row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub pet_id: DbId,
    pub address: String,
    pub career: Option<String>,
    pub work_time: Option<String>,
    pub work_place: Option<String>,
    pub day_off: Option<String>,
    pub salary: Option<f64>,
    pub date_of_birth: Option<Timestamp>,
    pub social_contact: Option<String>,
    pub current_pet_count: i32,
    pub current_pet_details: Option<String>,
    pub family_member_count: Option<i32>,
    pub family_always_home: Option<bool>,
    pub alone_hours: Option<i32>,
    pub housing_type: Option<String>,
    pub has_garden: bool,
    pub has_fence: bool,
    pub can_walk_dog: bool,
    pub delivery_type: Option<String>,
    pub why: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A supporting household photo linked to an adoption request.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HomeImage {
    pub id: DbId,
    pub adoption_request_id: DbId,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Questionnaire payload for a new adoption request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdoptionRequest {
    pub user_id: DbId,
    pub pet_id: DbId,
    pub address: String,
    pub career: Option<String>,
    pub work_time: Option<String>,
    pub work_place: Option<String>,
    pub day_off: Option<String>,
    pub salary: Option<f64>,
    pub date_of_birth: Option<Timestamp>,
    pub social_contact: Option<String>,
    pub current_pet_count: Option<i32>,
    pub current_pet_details: Option<String>,
    pub family_member_count: Option<i32>,
    pub family_always_home: Option<bool>,
    pub alone_hours: Option<i32>,
    pub housing_type: Option<String>,
    pub has_garden: Option<bool>,
    pub has_fence: Option<bool>,
    pub can_walk_dog: Option<bool>,
    pub delivery_type: Option<String>,
    pub why: Option<String>,
}
