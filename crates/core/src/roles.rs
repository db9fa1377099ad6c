//! Role name constants matching the `users.role` column values.

/// Administrators may manage the pet catalogue.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Regular adopters.
pub const ROLE_USER: &str = "USER";
