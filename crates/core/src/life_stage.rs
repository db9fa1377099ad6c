//! Life-stage classification derived from a pet's birth date.
//!
//! Age is never stored; every caller derives elapsed days from the birth
//! date at query time. The four stages partition the elapsed-day axis with
//! closed-open boundaries, and [`birth_date_range`] inverts a stage into
//! the birth-date window used by listing queries.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Upper bound (exclusive) of the KID stage, in elapsed days.
pub const KID_MAX_DAYS: i64 = 190;

/// Upper bound (exclusive) of the JUNIOR stage, in elapsed days.
pub const JUNIOR_MAX_DAYS: i64 = 730;

/// Upper bound (exclusive) of the SENIOR stage, in elapsed days.
pub const SENIOR_MAX_DAYS: i64 = 2557;

/// Life stage of a pet, derived from elapsed time since its birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifeStage {
    Kid,
    Junior,
    Senior,
    Adult,
}

impl LifeStage {
    /// Parse a stage label as it appears in query strings.
    ///
    /// Unknown labels return `None`; listing callers treat that as
    /// "no life-stage filter" rather than an error.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "KID" => Some(LifeStage::Kid),
            "JUNIOR" => Some(LifeStage::Junior),
            "SENIOR" => Some(LifeStage::Senior),
            "ADULT" => Some(LifeStage::Adult),
            _ => None,
        }
    }

    /// The label used in query strings and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            LifeStage::Kid => "KID",
            LifeStage::Junior => "JUNIOR",
            LifeStage::Senior => "SENIOR",
            LifeStage::Adult => "ADULT",
        }
    }
}

/// Birth-date window for a life stage at a given reference time.
///
/// `min` is inclusive, `max` exclusive. A `None` bound means the window is
/// open on that side (KID has no upper bound, ADULT no lower bound).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateRange {
    pub min: Option<Timestamp>,
    pub max: Option<Timestamp>,
}

/// Whole days elapsed between `birth_date` and `now`.
pub fn age_in_days(birth_date: Timestamp, now: Timestamp) -> i64 {
    (now - birth_date).num_days()
}

/// Classify a birth date into exactly one life stage.
///
/// Boundaries are closed-open on elapsed days: a pet exactly 190 days old
/// is JUNIOR, exactly 730 days old is SENIOR, exactly 2557 days old is
/// ADULT.
pub fn classify(birth_date: Timestamp, now: Timestamp) -> LifeStage {
    let days = age_in_days(birth_date, now);
    if days < KID_MAX_DAYS {
        LifeStage::Kid
    } else if days < JUNIOR_MAX_DAYS {
        LifeStage::Junior
    } else if days < SENIOR_MAX_DAYS {
        LifeStage::Senior
    } else {
        LifeStage::Adult
    }
}

/// Invert a life stage into the birth-date window matching [`classify`].
///
/// Used by the availability listing to turn an `age=JUNIOR` filter into a
/// range predicate over the stored birth date.
pub fn birth_date_range(stage: LifeStage, now: Timestamp) -> BirthDateRange {
    let days = chrono::Duration::days;
    match stage {
        LifeStage::Kid => BirthDateRange {
            min: Some(now - days(KID_MAX_DAYS)),
            max: None,
        },
        LifeStage::Junior => BirthDateRange {
            min: Some(now - days(JUNIOR_MAX_DAYS)),
            max: Some(now - days(KID_MAX_DAYS)),
        },
        LifeStage::Senior => BirthDateRange {
            min: Some(now - days(SENIOR_MAX_DAYS)),
            max: Some(now - days(JUNIOR_MAX_DAYS)),
        },
        LifeStage::Adult => BirthDateRange {
            min: None,
            max: Some(now - days(SENIOR_MAX_DAYS)),
        },
    }
}
