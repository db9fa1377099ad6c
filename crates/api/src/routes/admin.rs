//! Route definitions for administrative pet management.
//!
//! All handlers behind these routes enforce the admin role via the
//! `RequireAdmin` extractor.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::pet;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /pets        list_all
/// POST   /pets        create (multipart)
/// PUT    /pets/{id}   update (multipart)
/// DELETE /pets/{id}   delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(pet::list_all).post(pet::create))
        .route("/pets/{id}", put(pet::update).delete(pet::delete))
}
