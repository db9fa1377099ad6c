//! Route definitions for the `/adoptions` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::adoption;
use crate::state::AppState;

/// Routes mounted at `/adoptions`.
///
/// ```text
/// POST /   submit (multipart: questionnaire + home photos)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(adoption::submit))
}
