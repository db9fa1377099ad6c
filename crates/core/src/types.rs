/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps (including pet birth dates) are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
