//! Request handlers.
//!
//! Handlers delegate to the repositories in `pawhome_db` and map errors
//! via [`crate::error::AppError`]. Derived age fields are computed here,
//! at response-shaping time, never read from storage.

pub mod adoption;
pub mod pet;
