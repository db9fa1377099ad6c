//! Handler for the `/adoptions` resource.
//!
//! A submission is a multipart form carrying the applicant's contact and
//! questionnaire fields plus one-or-more `images` file parts with photos
//! of the home. The workflow stages the files locally, validates before
//! writing anything, uploads to the media gateway concurrently, then
//! persists the user update, the request, and the photo links in one
//! transaction. Staged files are removed on every exit path.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use pawhome_core::error::CoreError;
use pawhome_core::types::{DbId, Timestamp};
use pawhome_db::models::adoption::{AdoptionRequest, CreateAdoptionRequest, HomeImage};
use pawhome_db::models::user::UpdateUserContact;
use pawhome_db::repositories::{AdoptionRepo, PetRepo, UserRepo};
use pawhome_media::StagedFiles;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct AdoptionSubmission {
    pub request: AdoptionRequest,
    pub home_images: Vec<HomeImage>,
}

/// POST /api/v1/adoptions
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<AdoptionSubmission>)> {
    let (form, staged) = read_form(&state, multipart).await?;

    // Cleanup runs whether the workflow succeeded or not; a deletion
    // failure is logged inside cleanup and never replaces the outcome.
    let result = run_workflow(&state, form, &staged).await;
    staged.cleanup().await;
    result
}

async fn run_workflow(
    state: &AppState,
    form: AdoptionForm,
    staged: &StagedFiles,
) -> AppResult<(StatusCode, Json<AdoptionSubmission>)> {
    let (input, contact) = form.into_input()?;

    // Attachment presence is validated before any row is written.
    if staged.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one home photo is required".into(),
        )));
    }

    if AdoptionRepo::exists(&state.pool, input.user_id, input.pet_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An adoption request for this pet already exists".into(),
        )));
    }

    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    if !PetRepo::exists_active(&state.pool, input.pet_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Pet",
            id: input.pet_id,
        }));
    }

    // Fan-out: all home photos go to the media gateway concurrently; the
    // workflow resumes once every upload has finished. A single failure
    // aborts the submission (already-stored remote objects are left
    // behind, not retracted).
    let uploads = staged.paths().iter().map(|path| state.media.upload(path));
    let uploaded = futures::future::try_join_all(uploads).await?;
    let urls: Vec<String> = uploaded.into_iter().map(|media| media.url).collect();

    // Single transaction: user contact overwrite, request insert, photo
    // links. The uq_adoption_requests_user_pet constraint turns a lost
    // race on the duplicate pre-check into a 409 instead of a double row.
    let (request, home_images) =
        AdoptionRepo::create_with_images(&state.pool, &input, &contact, &urls).await?;

    tracing::info!(
        request_id = request.id,
        pet_id = request.pet_id,
        user_id = request.user_id,
        photos = home_images.len(),
        "Adoption request submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(AdoptionSubmission {
            request,
            home_images,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Multipart form plumbing
// ---------------------------------------------------------------------------

/// Raw text fields of the submission form.
#[derive(Debug, Default)]
struct AdoptionForm {
    user_id: Option<String>,
    pet_id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    career: Option<String>,
    work_time: Option<String>,
    work_place: Option<String>,
    day_off: Option<String>,
    salary: Option<String>,
    date_of_birth: Option<String>,
    social_contact: Option<String>,
    current_pet_count: Option<String>,
    current_pet_details: Option<String>,
    family_member_count: Option<String>,
    family_always_home: Option<String>,
    alone_hours: Option<String>,
    housing_type: Option<String>,
    has_garden: Option<String>,
    has_fence: Option<String>,
    can_walk_dog: Option<String>,
    delivery_type: Option<String>,
    why: Option<String>,
}

impl AdoptionForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "user_id" => self.user_id = Some(value),
            "pet_id" => self.pet_id = Some(value),
            "first_name" => self.first_name = Some(value),
            "last_name" => self.last_name = Some(value),
            "phone" => self.phone = Some(value),
            "email" => self.email = Some(value),
            "address" => self.address = Some(value),
            "career" => self.career = Some(value),
            "work_time" => self.work_time = Some(value),
            "work_place" => self.work_place = Some(value),
            "day_off" => self.day_off = Some(value),
            "salary" => self.salary = Some(value),
            "date_of_birth" => self.date_of_birth = Some(value),
            "social_contact" => self.social_contact = Some(value),
            "current_pet_count" => self.current_pet_count = Some(value),
            "current_pet_details" => self.current_pet_details = Some(value),
            "family_member_count" => self.family_member_count = Some(value),
            "family_always_home" => self.family_always_home = Some(value),
            "alone_hours" => self.alone_hours = Some(value),
            "housing_type" => self.housing_type = Some(value),
            "has_garden" => self.has_garden = Some(value),
            "has_fence" => self.has_fence = Some(value),
            "can_walk_dog" => self.can_walk_dog = Some(value),
            "delivery_type" => self.delivery_type = Some(value),
            "why" => self.why = Some(value),
            _ => {} // ignore unknown fields
        }
    }

    /// Parse the raw form into the typed questionnaire DTO and the
    /// contact overwrite, rejecting missing or malformed values.
    fn into_input(self) -> Result<(CreateAdoptionRequest, UpdateUserContact), AppError> {
        let user_id = parse_id("user_id", self.user_id)?;
        let pet_id = parse_id("pet_id", self.pet_id)?;
        let address = self.address.filter(|a| !a.is_empty()).ok_or_else(|| {
            AppError::Core(CoreError::Validation("'address' is required".into()))
        })?;

        let contact = UpdateUserContact {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
        };

        let input = CreateAdoptionRequest {
            user_id,
            pet_id,
            address,
            career: self.career,
            work_time: self.work_time,
            work_place: self.work_place,
            day_off: self.day_off,
            salary: parse_optional_f64("salary", self.salary)?,
            date_of_birth: self
                .date_of_birth
                .map(|raw| parse_timestamp("date_of_birth", &raw))
                .transpose()?,
            social_contact: self.social_contact,
            current_pet_count: parse_optional_i32("current_pet_count", self.current_pet_count)?,
            current_pet_details: self.current_pet_details,
            family_member_count: parse_optional_i32(
                "family_member_count",
                self.family_member_count,
            )?,
            family_always_home: self.family_always_home.map(|v| v == "true"),
            alone_hours: parse_optional_i32("alone_hours", self.alone_hours)?,
            housing_type: self.housing_type,
            has_garden: self.has_garden.map(|v| v == "true"),
            has_fence: self.has_fence.map(|v| v == "true"),
            can_walk_dog: self.can_walk_dog.map(|v| v == "true"),
            delivery_type: self.delivery_type,
            why: self.why,
        };

        Ok((input, contact))
    }
}

/// Read the submission form: text fields plus any number of `images`
/// file parts staged to disk. On error, files staged so far are removed
/// before returning.
async fn read_form(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<(AdoptionForm, StagedFiles)> {
    let mut form = AdoptionForm::default();
    let mut staged = StagedFiles::new();

    match read_fields(state, &mut multipart, &mut form, &mut staged).await {
        Ok(()) => Ok((form, staged)),
        Err(err) => {
            staged.cleanup().await;
            Err(err)
        }
    }
}

async fn read_fields(
    state: &AppState,
    multipart: &mut Multipart,
    form: &mut AdoptionForm,
    staged: &mut StagedFiles,
) -> AppResult<()> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "images" {
            let file_name = field.file_name().unwrap_or("home").to_string();
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

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

fn parse_id(name: &str, raw: Option<String>) -> Result<DbId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("'{name}' is required")))
    })?;
    raw.parse::<DbId>().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "'{name}' must be a numeric id, got '{raw}'"
        )))
    })
}

fn parse_optional_f64(name: &str, raw: Option<String>) -> Result<Option<f64>, AppError> {
    raw.map(|raw| {
        raw.parse::<f64>().map_err(|_| {
            AppError::Core(CoreError::Validation(format!(
                "'{name}' must be a number, got '{raw}'"
            )))
        })
    })
    .transpose()
}

fn parse_optional_i32(name: &str, raw: Option<String>) -> Result<Option<i32>, AppError> {
    raw.map(|raw| {
        raw.parse::<i32>().map_err(|_| {
            AppError::Core(CoreError::Validation(format!(
                "'{name}' must be an integer, got '{raw}'"
            )))
        })
    })
    .transpose()
}

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
