//! Storage seam. Services talk to a [`Store`]; `PgStore` backs production and
//! `MemoryStore` backs tests and database-less demo runs.

pub mod memory;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    application::{Application, NewApplication},
    company::{Company, CompanyChanges, CompanySummary},
    resume::{Resume, ResumeChanges},
    speciality::{NewSpeciality, Speciality, SpecialitySummary},
    user::{NewUser, User},
    vacancy::{Vacancy, VacancyChanges, VacancyFilter, VacancyListing},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by the health check.
    fn backend(&self) -> &'static str;
    async fn ping(&self) -> Result<()>;

    async fn list_specialities(&self) -> Result<Vec<SpecialitySummary>>;
    async fn speciality_by_id(&self, id: i64) -> Result<Option<Speciality>>;
    async fn speciality_by_code(&self, code: &str) -> Result<Option<Speciality>>;
    async fn insert_speciality(&self, new: NewSpeciality) -> Result<Speciality>;

    async fn list_companies(&self) -> Result<Vec<CompanySummary>>;
    async fn company_by_id(&self, id: i64) -> Result<Option<Company>>;
    async fn company_by_owner(&self, owner_id: i64) -> Result<Option<Company>>;
    async fn company_by_name(&self, name: &str) -> Result<Option<Company>>;
    async fn insert_company(&self, changes: CompanyChanges) -> Result<Company>;
    async fn update_company(&self, id: i64, changes: CompanyChanges) -> Result<Company>;

    /// Rows come back in ascending id order.
    async fn list_vacancies(&self, filter: VacancyFilter) -> Result<Vec<VacancyListing>>;
    async fn vacancy_by_id(&self, id: i64) -> Result<Option<VacancyListing>>;
    async fn insert_vacancy(&self, changes: VacancyChanges) -> Result<Vacancy>;
    async fn update_vacancy(&self, id: i64, changes: VacancyChanges) -> Result<Vacancy>;

    async fn insert_application(&self, new: NewApplication) -> Result<Application>;
    async fn applications_for_vacancy(&self, vacancy_id: i64) -> Result<Vec<Application>>;

    async fn resume_by_user(&self, user_id: i64) -> Result<Option<Resume>>;
    async fn insert_resume(&self, changes: ResumeChanges) -> Result<Resume>;
    async fn update_resume(&self, id: i64, changes: ResumeChanges) -> Result<Resume>;

    async fn user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert_user(&self, new: NewUser) -> Result<User>;
}
