//! Pure domain logic for the pawhome adoption platform.
//!
//! This crate has no internal dependencies so the persistence layer, the
//! API server, and any future CLI tooling can all build on it.

pub mod error;
pub mod life_stage;
pub mod roles;
pub mod sampling;
pub mod types;
