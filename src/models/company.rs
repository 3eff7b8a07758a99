use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_EMPLOYEE_COUNT: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: String,
    pub logo: String,
    pub employee_count: i32,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanySummary {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub logo: String,
    pub employee_count: i32,
    pub vacancies_count: i64,
}

/// Full set of writable company columns. Updates overwrite every field.
#[derive(Debug, Clone)]
pub struct CompanyChanges {
    pub name: String,
    pub location: String,
    pub description: String,
    pub logo: String,
    pub employee_count: i32,
    pub owner_id: Option<i64>,
}
