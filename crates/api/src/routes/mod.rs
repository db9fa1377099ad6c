//! Route definitions.

pub mod admin;
pub mod adoption;
pub mod health;
pub mod pet;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /pets/available        availability listing (filters + pagination)
/// /pets/random           uniform random sample of available pets
/// /pets/{id}             pet detail
///
/// /adoptions             submit adoption request (multipart)
///
/// /admin/pets            list, create (admin only)
/// /admin/pets/{id}       update, soft-delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pets", pet::router())
        .nest("/adoptions", adoption::router())
        .nest("/admin", admin::router())
}
