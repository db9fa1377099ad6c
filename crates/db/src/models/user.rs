//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhome_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Role name (`"ADMIN"` or `"USER"`).
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user (registration is handled upstream; this
/// exists for seeding and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Contact fields overwritten on every adoption submission.
///
/// Absent fields keep their existing values (merge semantics).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
