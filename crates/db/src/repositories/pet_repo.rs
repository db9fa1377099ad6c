//! Repository for the `pets` and `pet_images` tables.
//!
//! Every public read joins the optional primary image and excludes
//! soft-deleted rows. Pets are soft-deleted only; `deleted_at` is the
//! lifecycle marker, never a hard DELETE.

use sqlx::PgPool;

use pawhome_core::types::DbId;

use crate::models::pet::{
    AvailablePetFilter, CreatePet, Pet, PetCard, PetSummary, UpdatePet, STATUS_AVAILABLE,
};

/// Column list for joined `pets` queries (`p` = pets, `pi` = pet_images).
const COLUMNS: &str = "\
    p.id, p.name_en, p.name_th, p.breed_en, p.breed_th, \
    p.description_en, p.description_th, p.birth_date, p.color, p.gender, \
    p.species, p.medical_history, p.is_vaccinated, p.is_neutered, \
    p.weight, p.status, p.created_at, p.updated_at, \
    pi.url AS image_url";

/// Join clause shared by every read.
const IMAGE_JOIN: &str = "LEFT JOIN pet_images pi ON pi.pet_id = p.id";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet, optionally linking its primary image, in one
    /// transaction. Returns the created row with the image joined.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePet,
        image_url: Option<&str>,
    ) -> Result<Pet, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO pets (\
                name_en, name_th, breed_en, breed_th, \
                description_en, description_th, birth_date, color, gender, \
                species, medical_history, is_vaccinated, is_neutered, weight\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
                       COALESCE($12, false), COALESCE($13, false), $14)
             RETURNING id",
        )
        .bind(&input.name_en)
        .bind(&input.name_th)
        .bind(&input.breed_en)
        .bind(&input.breed_th)
        .bind(&input.description_en)
        .bind(&input.description_th)
        .bind(input.birth_date)
        .bind(&input.color)
        .bind(&input.gender)
        .bind(&input.species)
        .bind(&input.medical_history)
        .bind(input.is_vaccinated)
        .bind(input.is_neutered)
        .bind(input.weight)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(url) = image_url {
            sqlx::query("INSERT INTO pet_images (pet_id, url) VALUES ($1, $2)")
                .bind(id)
                .bind(url)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a non-soft-deleted pet by ID, with its image.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets p {IMAGE_JOIN}
             WHERE p.id = $1 AND p.deleted_at IS NULL"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a non-soft-deleted pet with this ID exists.
    pub async fn exists_active(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pets WHERE id = $1 AND deleted_at IS NULL)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List every non-soft-deleted pet regardless of status (admin view),
    /// most recently created first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets p {IMAGE_JOIN}
             WHERE p.deleted_at IS NULL
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, Pet>(&query).fetch_all(pool).await
    }

    /// List available pets with conjunctive optional filters and
    /// pagination, most recently created first.
    pub async fn list_available(
        pool: &PgPool,
        filter: &AvailablePetFilter,
    ) -> Result<Vec<PetSummary>, sqlx::Error> {
        // Build dynamic WHERE clauses; status and soft-delete predicates
        // are always present.
        let mut conditions = vec![
            "p.status = $1".to_string(),
            "p.deleted_at IS NULL".to_string(),
        ];
        let mut bind_idx = 2u32;

        if filter.gender.is_some() {
            conditions.push(format!("p.gender = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.min_birth_date.is_some() {
            conditions.push(format!("p.birth_date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.max_birth_date.is_some() {
            conditions.push(format!("p.birth_date < ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.weight.is_some() {
            conditions.push(format!("p.weight = ${bind_idx}"));
            bind_idx += 1;
        }

        let query = format!(
            "SELECT p.id, p.name_en, p.name_th, p.birth_date, p.gender, p.weight, \
                    pi.url AS image_url \
             FROM pets p {IMAGE_JOIN} \
             WHERE {} \
             ORDER BY p.created_at DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            conditions.join(" AND "),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, PetSummary>(&query).bind(STATUS_AVAILABLE);

        // Bind dynamic parameters in order.
        if let Some(ref gender) = filter.gender {
            q = q.bind(gender);
        }
        if let Some(min) = filter.min_birth_date {
            q = q.bind(min);
        }
        if let Some(max) = filter.max_birth_date {
            q = q.bind(max);
        }
        if let Some(weight) = filter.weight {
            q = q.bind(weight);
        }

        q.bind(filter.limit).bind(filter.offset).fetch_all(pool).await
    }

    /// All available pets in the restricted card projection, for the
    /// random selector. No pagination; the caller samples in memory.
    pub async fn list_available_cards(pool: &PgPool) -> Result<Vec<PetCard>, sqlx::Error> {
        let query = format!(
            "SELECT p.id, p.name_en, p.name_th, p.breed_en, p.breed_th, \
                    pi.url AS image_url \
             FROM pets p {IMAGE_JOIN} \
             WHERE p.status = $1 AND p.deleted_at IS NULL"
        );
        sqlx::query_as::<_, PetCard>(&query)
            .bind(STATUS_AVAILABLE)
            .fetch_all(pool)
            .await
    }

    /// Merge-update a pet; absent fields keep their existing values. When
    /// `image_url` is given the primary image is upserted in the same
    /// transaction.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePet,
        image_url: Option<&str>,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE pets SET
                name_en = COALESCE($2, name_en),
                name_th = COALESCE($3, name_th),
                breed_en = COALESCE($4, breed_en),
                breed_th = COALESCE($5, breed_th),
                description_en = COALESCE($6, description_en),
                description_th = COALESCE($7, description_th),
                birth_date = COALESCE($8, birth_date),
                color = COALESCE($9, color),
                gender = COALESCE($10, gender),
                species = COALESCE($11, species),
                medical_history = COALESCE($12, medical_history),
                is_vaccinated = COALESCE($13, is_vaccinated),
                is_neutered = COALESCE($14, is_neutered),
                weight = COALESCE($15, weight),
                status = COALESCE($16, status)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name_en)
        .bind(&input.name_th)
        .bind(&input.breed_en)
        .bind(&input.breed_th)
        .bind(&input.description_en)
        .bind(&input.description_th)
        .bind(input.birth_date)
        .bind(&input.color)
        .bind(&input.gender)
        .bind(&input.species)
        .bind(&input.medical_history)
        .bind(input.is_vaccinated)
        .bind(input.is_neutered)
        .bind(input.weight)
        .bind(&input.status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(url) = image_url {
            sqlx::query(
                "INSERT INTO pet_images (pet_id, url) VALUES ($1, $2)
                 ON CONFLICT (pet_id) DO UPDATE SET url = EXCLUDED.url",
            )
            .bind(id)
            .bind(url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Soft-delete a pet. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE pets SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
