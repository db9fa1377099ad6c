//! Repository for the `adoption_requests` and `home_images` tables.

use sqlx::PgPool;

use pawhome_core::types::DbId;

use crate::models::adoption::{AdoptionRequest, CreateAdoptionRequest, HomeImage};
use crate::models::user::UpdateUserContact;

/// Column list for `adoption_requests` queries.
const COLUMNS: &str = "\
    id, user_id, pet_id, address, career, work_time, work_place, day_off, \
    salary, date_of_birth, social_contact, current_pet_count, \
    current_pet_details, family_member_count, family_always_home, \
    alone_hours, housing_type, has_garden, has_fence, can_walk_dog, \
    delivery_type, why, created_at, updated_at";

/// Column list for `home_images` queries.
const IMAGE_COLUMNS: &str = "id, adoption_request_id, url, created_at, updated_at";

/// Provides operations for adoption requests and their home photos.
pub struct AdoptionRepo;

impl AdoptionRepo {
    /// Whether an adoption request already exists for this (user, pet)
    /// pair. A friendly pre-check; the unique constraint
    /// `uq_adoption_requests_user_pet` remains the authoritative guard
    /// under concurrent submissions.
    pub async fn exists(pool: &PgPool, user_id: DbId, pet_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM adoption_requests WHERE user_id = $1 AND pet_id = $2)",
        )
        .bind(user_id)
        .bind(pet_id)
        .fetch_one(pool)
        .await
    }

    /// Find an adoption request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests WHERE id = $1");
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the home photos linked to an adoption request.
    pub async fn list_home_images(
        pool: &PgPool,
        adoption_request_id: DbId,
    ) -> Result<Vec<HomeImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM home_images
             WHERE adoption_request_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, HomeImage>(&query)
            .bind(adoption_request_id)
            .fetch_all(pool)
            .await
    }

    /// Persist a submission in a single transaction: overwrite the
    /// applicant's contact fields, insert the adoption_requests row, and
    /// bulk-insert one home_images row per uploaded URL.
    ///
    /// A unique-constraint violation on (user_id, pet_id) rolls the whole
    /// transaction back and surfaces as the sqlx database error the API
    /// layer classifies as a conflict.
    pub async fn create_with_images(
        pool: &PgPool,
        input: &CreateAdoptionRequest,
        contact: &UpdateUserContact,
        image_urls: &[String],
    ) -> Result<(AdoptionRequest, Vec<HomeImage>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email)
             WHERE id = $1",
        )
        .bind(input.user_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .execute(&mut *tx)
        .await?;

        let insert = format!(
            "INSERT INTO adoption_requests (\
                user_id, pet_id, address, career, work_time, work_place, \
                day_off, salary, date_of_birth, social_contact, \
                current_pet_count, current_pet_details, family_member_count, \
                family_always_home, alone_hours, housing_type, has_garden, \
                has_fence, can_walk_dog, delivery_type, why\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                       COALESCE($11, 0), $12, $13, $14, $15, $16, \
                       COALESCE($17, false), COALESCE($18, false), \
                       COALESCE($19, false), $20, $21)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, AdoptionRequest>(&insert)
            .bind(input.user_id)
            .bind(input.pet_id)
            .bind(&input.address)
            .bind(&input.career)
            .bind(&input.work_time)
            .bind(&input.work_place)
            .bind(&input.day_off)
            .bind(input.salary)
            .bind(input.date_of_birth)
            .bind(&input.social_contact)
            .bind(input.current_pet_count)
            .bind(&input.current_pet_details)
            .bind(input.family_member_count)
            .bind(input.family_always_home)
            .bind(input.alone_hours)
            .bind(&input.housing_type)
            .bind(input.has_garden)
            .bind(input.has_fence)
            .bind(input.can_walk_dog)
            .bind(&input.delivery_type)
            .bind(&input.why)
            .fetch_one(&mut *tx)
            .await?;

        let bulk = format!(
            "INSERT INTO home_images (adoption_request_id, url)
             SELECT $1, url FROM UNNEST($2::text[]) AS t(url)
             RETURNING {IMAGE_COLUMNS}"
        );
        let images = sqlx::query_as::<_, HomeImage>(&bulk)
            .bind(request.id)
            .bind(image_urls)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((request, images))
    }
}
