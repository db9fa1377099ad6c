//! Pet entity models, projections, and DTOs.
//!
//! The full [`Pet`] row backs admin management and detail lookups; the
//! listing and random-selector endpoints use restricted projections so the
//! queries only pull what they serialize. None of the structs carry an age
//! field -- elapsed days are derived from `birth_date` by the caller.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhome_core::types::{DbId, Timestamp};

/// Lifecycle status of a pet that may appear in public listings.
pub const STATUS_AVAILABLE: &str = "AVAILABLE";

/// Full pet row joined with its optional primary image URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub name_en: String,
    pub name_th: String,
    pub breed_en: Option<String>,
    pub breed_th: Option<String>,
    pub description_en: Option<String>,
    pub description_th: Option<String>,
    pub birth_date: Timestamp,
    pub color: String,
    pub gender: String,
    pub species: String,
    pub medical_history: Option<String>,
    pub is_vaccinated: bool,
    pub is_neutered: bool,
    pub weight: Option<f64>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// URL of the primary image, when one has been uploaded.
    pub image_url: Option<String>,
}

/// Restricted projection for the availability listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PetSummary {
    pub id: DbId,
    pub name_en: String,
    pub name_th: String,
    pub birth_date: Timestamp,
    pub gender: String,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
}

/// Restricted projection for the random selector.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PetCard {
    pub id: DbId,
    pub name_en: String,
    pub name_th: String,
    pub breed_en: Option<String>,
    pub breed_th: Option<String>,
    pub image_url: Option<String>,
}

/// Filter for the availability listing. All predicates are conjunctive.
///
/// The birth-date bounds come from inverting a life-stage label; `min` is
/// inclusive and `max` exclusive, mirroring the classification thresholds.
#[derive(Debug, Clone, Default)]
pub struct AvailablePetFilter {
    pub gender: Option<String>,
    pub min_birth_date: Option<Timestamp>,
    pub max_birth_date: Option<Timestamp>,
    pub weight: Option<f64>,
    pub limit: i64,
    pub offset: i64,
}

/// DTO for administrative pet creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub name_en: String,
    pub name_th: String,
    pub breed_en: Option<String>,
    pub breed_th: Option<String>,
    pub description_en: Option<String>,
    pub description_th: Option<String>,
    pub birth_date: Timestamp,
    pub color: String,
    pub gender: String,
    pub species: String,
    pub medical_history: Option<String>,
    pub is_vaccinated: Option<bool>,
    pub is_neutered: Option<bool>,
    pub weight: Option<f64>,
}

/// DTO for administrative pet updates. Absent fields keep existing values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePet {
    pub name_en: Option<String>,
    pub name_th: Option<String>,
    pub breed_en: Option<String>,
    pub breed_th: Option<String>,
    pub description_en: Option<String>,
    pub description_th: Option<String>,
    pub birth_date: Option<Timestamp>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub species: Option<String>,
    pub medical_history: Option<String>,
    pub is_vaccinated: Option<bool>,
    pub is_neutered: Option<bool>,
    pub weight: Option<f64>,
    pub status: Option<String>,
}
