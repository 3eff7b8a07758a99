use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Speciality {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub picture: String,
}

/// Speciality row annotated with the number of vacancies filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecialitySummary {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub picture: String,
    pub vacancies_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewSpeciality {
    pub code: String,
    pub title: String,
    pub picture: String,
}
