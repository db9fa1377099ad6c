//! Handlers for the `/pets` resource and its admin counterpart.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use pawhome_core::error::CoreError;
use pawhome_core::life_stage::{self, LifeStage};
use pawhome_core::sampling;
use pawhome_core::types::{DbId, Timestamp};
use pawhome_db::models::pet::{AvailablePetFilter, CreatePet, Pet, PetCard, UpdatePet};
use pawhome_db::repositories::PetRepo;
use pawhome_media::StagedFiles;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{parse_positive, parse_weight, AvailablePetsQuery, DEFAULT_PAGE_SIZE};
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of pets returned by the random selector.
const RANDOM_SAMPLE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Listing entry: summary fields plus the derived age and the raw birth
/// date under separate names.
#[derive(Debug, Serialize)]
pub struct AvailablePet {
    pub id: DbId,
    pub name_en: String,
    pub name_th: String,
    /// Elapsed days since birth, derived at query time.
    pub age_days: i64,
    pub birth_date: Timestamp,
    pub gender: String,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
}

/// Detail response: the full pet row plus the derived age.
#[derive(Debug, Serialize)]
pub struct PetDetail {
    #[serde(flatten)]
    pub pet: Pet,
    /// Elapsed days since birth, derived at query time.
    pub age_days: i64,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pets/available
///
/// Available, non-deleted pets with optional conjunctive filters (gender,
/// life stage, weight), newest first, paginated.
pub async fn list_available(
    State(state): State<AppState>,
    Query(params): Query<AvailablePetsQuery>,
) -> AppResult<Json<Vec<AvailablePet>>> {
    let page = parse_positive("page", params.page.as_deref(), 1).map_err(AppError::Core)?;
    let count = parse_positive("count", params.count.as_deref(), DEFAULT_PAGE_SIZE)
        .map_err(AppError::Core)?;
    let weight = parse_weight(params.weight.as_deref()).map_err(AppError::Core)?;

    let now = chrono::Utc::now();
    let stage_range = params
        .age
        .as_deref()
        .and_then(LifeStage::parse)
        .map(|stage| life_stage::birth_date_range(stage, now));

    let filter = AvailablePetFilter {
        gender: params.gender.clone(),
        min_birth_date: stage_range.and_then(|r| r.min),
        max_birth_date: stage_range.and_then(|r| r.max),
        weight,
        limit: count,
        offset: (page - 1) * count,
    };

    let pets = PetRepo::list_available(&state.pool, &filter).await?;
    let listing = pets
        .into_iter()
        .map(|p| AvailablePet {
            id: p.id,
            name_en: p.name_en,
            name_th: p.name_th,
            age_days: life_stage::age_in_days(p.birth_date, now),
            birth_date: p.birth_date,
            gender: p.gender,
            weight: p.weight,
            image_url: p.image_url,
        })
        .collect();

    Ok(Json(listing))
}

/// GET /api/v1/pets/random
///
/// A uniform sample of at most five available pets in the card
/// projection. Only the in-memory result is shuffled.
pub async fn random(State(state): State<AppState>) -> AppResult<Json<Vec<PetCard>>> {
    let cards = PetRepo::list_available_cards(&state.pool).await?;
    Ok(Json(sampling::sample(cards, RANDOM_SAMPLE_SIZE)))
}

/// GET /api/v1/pets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PetDetail>> {
    let pet = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    let age_days = life_stage::age_in_days(pet.birth_date, chrono::Utc::now());
    Ok(Json(PetDetail { pet, age_days }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/pets
///
/// Every non-deleted pet regardless of status.
pub async fn list_all(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Pet>>>> {
    let pets = PetRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: pets }))
}

/// POST /api/v1/admin/pets
///
/// Multipart form: pet attributes as text fields plus an optional `image`
/// file uploaded through the media gateway. The staged file is removed on
/// every exit path.
pub async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Pet>>)> {
    let (form, staged) = read_pet_form(&state, multipart).await?;
    let result = create_inner(&state, form, &staged).await;
    staged.cleanup().await;
    result
}

async fn create_inner(
    state: &AppState,
    form: PetForm,
    staged: &StagedFiles,
) -> AppResult<(StatusCode, Json<DataResponse<Pet>>)> {
    let input = form.into_create_input()?;
    let image_url = upload_single(state, staged).await?;

    let pet = PetRepo::create(&state.pool, &input, image_url.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pet })))
}

/// PUT /api/v1/admin/pets/{id}
///
/// Merge-update: absent fields keep their existing values. A supplied
/// `image` file replaces the primary image.
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Pet>>> {
    let (form, staged) = read_pet_form(&state, multipart).await?;
    let result = update_inner(&state, id, form, &staged).await;
    staged.cleanup().await;
    result
}

async fn update_inner(
    state: &AppState,
    id: DbId,
    form: PetForm,
    staged: &StagedFiles,
) -> AppResult<Json<DataResponse<Pet>>> {
    let input = form.into_update_input()?;
    let image_url = upload_single(state, staged).await?;

    let pet = PetRepo::update(&state.pool, id, &input, image_url.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;
    Ok(Json(DataResponse { data: pet }))
}

/// DELETE /api/v1/admin/pets/{id}
///
/// Soft delete; the pet disappears from every listing and lookup.
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PetRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Pet", id }))
    }
}

// ---------------------------------------------------------------------------
// Multipart form plumbing
// ---------------------------------------------------------------------------

/// Text fields of the admin pet form, collected as raw strings.
#[derive(Debug, Default)]
struct PetForm {
    name_en: Option<String>,
    name_th: Option<String>,
    breed_en: Option<String>,
    breed_th: Option<String>,
    description_en: Option<String>,
    description_th: Option<String>,
    birth_date: Option<String>,
    color: Option<String>,
    gender: Option<String>,
    species: Option<String>,
    medical_history: Option<String>,
    is_vaccinated: Option<String>,
    is_neutered: Option<String>,
    weight: Option<String>,
    status: Option<String>,
}

impl PetForm {
    fn into_create_input(self) -> Result<CreatePet, AppError> {
        let required = |field: Option<String>, name: &str| {
            field.ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!("'{name}' is required")))
            })
        };

        Ok(CreatePet {
            name_en: required(self.name_en, "name_en")?,
            name_th: required(self.name_th, "name_th")?,
            breed_en: self.breed_en,
            breed_th: self.breed_th,
            description_en: self.description_en,
            description_th: self.description_th,
            birth_date: parse_timestamp("birth_date", &required(self.birth_date, "birth_date")?)?,
            color: required(self.color, "color")?,
            gender: required(self.gender, "gender")?,
            species: required(self.species, "species")?,
            medical_history: self.medical_history,
            is_vaccinated: self.is_vaccinated.map(|v| v == "true"),
            is_neutered: self.is_neutered.map(|v| v == "true"),
            weight: parse_optional_weight(self.weight)?,
        })
    }

    fn into_update_input(self) -> Result<UpdatePet, AppError> {
        let birth_date = self
            .birth_date
            .map(|raw| parse_timestamp("birth_date", &raw))
            .transpose()?;

        Ok(UpdatePet {
            name_en: self.name_en,
            name_th: self.name_th,
            breed_en: self.breed_en,
            breed_th: self.breed_th,
            description_en: self.description_en,
            description_th: self.description_th,
            birth_date,
            color: self.color,
            gender: self.gender,
            species: self.species,
            medical_history: self.medical_history,
            is_vaccinated: self.is_vaccinated.map(|v| v == "true"),
            is_neutered: self.is_neutered.map(|v| v == "true"),
            weight: parse_optional_weight(self.weight)?,
            status: self.status,
        })
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "name_en" => self.name_en = Some(value),
            "name_th" => self.name_th = Some(value),
            "breed_en" => self.breed_en = Some(value),
            "breed_th" => self.breed_th = Some(value),
            "description_en" => self.description_en = Some(value),
            "description_th" => self.description_th = Some(value),
            "birth_date" => self.birth_date = Some(value),
            "color" => self.color = Some(value),
            "gender" => self.gender = Some(value),
            "species" => self.species = Some(value),
            "medical_history" => self.medical_history = Some(value),
            "is_vaccinated" => self.is_vaccinated = Some(value),
            "is_neutered" => self.is_neutered = Some(value),
            "weight" => self.weight = Some(value),
            "status" => self.status = Some(value),
            _ => {} // ignore unknown fields
        }
    }
}

/// Read the admin pet form: text fields plus an optional single `image`
/// file staged to disk. On error, files staged so far are removed before
/// returning.
async fn read_pet_form(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<(PetForm, StagedFiles)> {
    let mut form = PetForm::default();
    let mut staged = StagedFiles::new();

    match read_pet_fields(state, &mut multipart, &mut form, &mut staged).await {
        Ok(()) => Ok((form, staged)),
        Err(err) => {
            staged.cleanup().await;
            Err(err)
        }
    }
}

async fn read_pet_fields(
    state: &AppState,
    multipart: &mut Multipart,
    form: &mut PetForm,
    staged: &mut StagedFiles,
) -> AppResult<()> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            staged
                .stage(&state.config.upload_dir, &file_name, &bytes)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?;
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        form.set(&name, value);
    }
    Ok(())
}

/// Upload the staged image (if any) through the media gateway.
async fn upload_single(state: &AppState, staged: &StagedFiles) -> AppResult<Option<String>> {
    match staged.paths().first() {
        Some(path) => {
            let uploaded = state.media.upload(path).await?;
            Ok(Some(uploaded.url))
        }
        None => Ok(None),
    }
}

/// Parse an ISO-8601 timestamp, accepting a bare `YYYY-MM-DD` date.
fn parse_timestamp(name: &str, raw: &str) -> Result<Timestamp, AppError> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&chrono::Utc));
    }
    if let Ok(date) = raw.parse::<chrono::NaiveDate>() {
        return Ok(date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc());
    }
    Err(AppError::Core(CoreError::Validation(format!(
        "'{name}' must be an ISO-8601 date, got '{raw}'"
    ))))
}

fn parse_optional_weight(raw: Option<String>) -> Result<Option<f64>, AppError> {
    parse_weight(raw.as_deref()).map_err(AppError::Core)
}
