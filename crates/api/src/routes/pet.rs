//! Route definitions for the public `/pets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pet;
use crate::state::AppState;

/// Routes mounted at `/pets`.
///
/// ```text
/// GET /available   list_available
/// GET /random      random
/// GET /{id}        get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/available", get(pet::list_available))
        .route("/random", get(pet::random))
        .route("/{id}", get(pet::get_by_id))
}
