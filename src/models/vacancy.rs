use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i64,
    pub title: String,
    pub skills: String,
    pub text: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub published_at: NaiveDate,
    pub speciality_id: i64,
    pub company_id: i64,
}

/// Vacancy joined with the company and speciality columns that listings show.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VacancyListing {
    pub id: i64,
    pub title: String,
    pub skills: String,
    pub text: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub published_at: NaiveDate,
    pub speciality_id: i64,
    pub speciality_code: String,
    pub speciality_title: String,
    pub company_id: i64,
    pub company_name: String,
    pub company_logo: String,
    pub applications_count: i64,
}

/// Writable vacancy columns. `published_at` is assigned by the store on insert
/// and never rewritten.
#[derive(Debug, Clone)]
pub struct VacancyChanges {
    pub title: String,
    pub skills: String,
    pub text: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub speciality_id: i64,
    pub company_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VacancyFilter {
    All,
    SpecialityCode(String),
    Company(i64),
    Search(String),
}

impl VacancyFilter {
    /// In-memory twin of the SQL predicate each variant compiles to.
    pub fn matches(&self, listing: &VacancyListing) -> bool {
        match self {
            VacancyFilter::All => true,
            VacancyFilter::SpecialityCode(code) => listing.speciality_code == *code,
            VacancyFilter::Company(company_id) => listing.company_id == *company_id,
            VacancyFilter::Search(query) => {
                let needle = query.to_lowercase();
                listing.title.to_lowercase().contains(&needle)
                    || listing.skills.to_lowercase().contains(&needle)
                    || listing.text.to_lowercase().contains(&needle)
            }
        }
    }
}
