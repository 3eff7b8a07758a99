use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, NewApplication},
    company::{Company, CompanyChanges, CompanySummary},
    resume::{Resume, ResumeChanges},
    speciality::{NewSpeciality, Speciality, SpecialitySummary},
    user::{NewUser, User},
    vacancy::{Vacancy, VacancyChanges, VacancyFilter, VacancyListing},
};

/// BTreeMaps keyed by id keep the ascending-id scan order the SQL store uses.
#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    specialities: BTreeMap<i64, Speciality>,
    companies: BTreeMap<i64, Company>,
    vacancies: BTreeMap<i64, Vacancy>,
    applications: BTreeMap<i64, Application>,
    resumes: BTreeMap<i64, Resume>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn listing(&self, vacancy: &Vacancy) -> Result<VacancyListing> {
        let speciality = self.specialities.get(&vacancy.speciality_id).ok_or_else(|| {
            Error::Internal(format!("vacancy {} has a dangling speciality", vacancy.id))
        })?;
        let company = self.companies.get(&vacancy.company_id).ok_or_else(|| {
            Error::Internal(format!("vacancy {} has a dangling company", vacancy.id))
        })?;
        let applications_count = self
            .applications
            .values()
            .filter(|application| application.vacancy_id == Some(vacancy.id))
            .count() as i64;

        Ok(VacancyListing {
            id: vacancy.id,
            title: vacancy.title.clone(),
            skills: vacancy.skills.clone(),
            text: vacancy.text.clone(),
            salary_min: vacancy.salary_min,
            salary_max: vacancy.salary_max,
            published_at: vacancy.published_at,
            speciality_id: speciality.id,
            speciality_code: speciality.code.clone(),
            speciality_title: speciality.title.clone(),
            company_id: company.id,
            company_name: company.name.clone(),
            company_logo: company.logo.clone(),
            applications_count,
        })
    }

    fn check_company_unique(&self, id: Option<i64>, changes: &CompanyChanges) -> Result<()> {
        let clash = self.companies.values().any(|company| {
            Some(company.id) != id
                && (company.name == changes.name
                    || (changes.owner_id.is_some() && company.owner_id == changes.owner_id))
        });
        if clash {
            return Err(Error::Conflict(
                "company name or owner is already taken".to_string(),
            ));
        }
        Ok(())
    }

    fn check_vacancy_refs(&self, changes: &VacancyChanges) -> Result<()> {
        if !self.specialities.contains_key(&changes.speciality_id) {
            return Err(Error::Internal(format!(
                "speciality {} does not exist",
                changes.speciality_id
            )));
        }
        if !self.companies.contains_key(&changes.company_id) {
            return Err(Error::Internal(format!(
                "company {} does not exist",
                changes.company_id
            )));
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn application_count(&self) -> usize {
        self.tables.read().await.applications.len()
    }

    pub async fn company_count(&self) -> usize {
        self.tables.read().await.companies.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_specialities(&self) -> Result<Vec<SpecialitySummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .specialities
            .values()
            .map(|speciality| SpecialitySummary {
                id: speciality.id,
                code: speciality.code.clone(),
                title: speciality.title.clone(),
                picture: speciality.picture.clone(),
                vacancies_count: tables
                    .vacancies
                    .values()
                    .filter(|vacancy| vacancy.speciality_id == speciality.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn speciality_by_id(&self, id: i64) -> Result<Option<Speciality>> {
        Ok(self.tables.read().await.specialities.get(&id).cloned())
    }

    async fn speciality_by_code(&self, code: &str) -> Result<Option<Speciality>> {
        let tables = self.tables.read().await;
        Ok(tables
            .specialities
            .values()
            .find(|speciality| speciality.code == code)
            .cloned())
    }

    async fn insert_speciality(&self, new: NewSpeciality) -> Result<Speciality> {
        let mut tables = self.tables.write().await;
        if tables.specialities.values().any(|s| s.title == new.title) {
            return Err(Error::Conflict(format!(
                "speciality '{}' already exists",
                new.title
            )));
        }
        let speciality = Speciality {
            id: tables.allocate_id(),
            code: new.code,
            title: new.title,
            picture: new.picture,
        };
        tables.specialities.insert(speciality.id, speciality.clone());
        Ok(speciality)
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .values()
            .map(|company| CompanySummary {
                id: company.id,
                name: company.name.clone(),
                location: company.location.clone(),
                logo: company.logo.clone(),
                employee_count: company.employee_count,
                vacancies_count: tables
                    .vacancies
                    .values()
                    .filter(|vacancy| vacancy.company_id == company.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn company_by_id(&self, id: i64) -> Result<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn company_by_owner(&self, owner_id: i64) -> Result<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .values()
            .find(|company| company.owner_id == Some(owner_id))
            .cloned())
    }

    async fn company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .values()
            .find(|company| company.name == name)
            .cloned())
    }

    async fn insert_company(&self, changes: CompanyChanges) -> Result<Company> {
        let mut tables = self.tables.write().await;
        tables.check_company_unique(None, &changes)?;
        let company = Company {
            id: tables.allocate_id(),
            name: changes.name,
            location: changes.location,
            description: changes.description,
            logo: changes.logo,
            employee_count: changes.employee_count,
            owner_id: changes.owner_id,
        };
        tables.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn update_company(&self, id: i64, changes: CompanyChanges) -> Result<Company> {
        let mut tables = self.tables.write().await;
        tables.check_company_unique(Some(id), &changes)?;
        let company = tables
            .companies
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("company {}", id)))?;
        company.name = changes.name;
        company.location = changes.location;
        company.description = changes.description;
        company.logo = changes.logo;
        company.employee_count = changes.employee_count;
        company.owner_id = changes.owner_id;
        Ok(company.clone())
    }

    async fn list_vacancies(&self, filter: VacancyFilter) -> Result<Vec<VacancyListing>> {
        let tables = self.tables.read().await;
        let mut rows = Vec::new();
        for vacancy in tables.vacancies.values() {
            let listing = tables.listing(vacancy)?;
            if filter.matches(&listing) {
                rows.push(listing);
            }
        }
        Ok(rows)
    }

    async fn vacancy_by_id(&self, id: i64) -> Result<Option<VacancyListing>> {
        let tables = self.tables.read().await;
        tables
            .vacancies
            .get(&id)
            .map(|vacancy| tables.listing(vacancy))
            .transpose()
    }

    async fn insert_vacancy(&self, changes: VacancyChanges) -> Result<Vacancy> {
        let mut tables = self.tables.write().await;
        tables.check_vacancy_refs(&changes)?;
        let vacancy = Vacancy {
            id: tables.allocate_id(),
            title: changes.title,
            skills: changes.skills,
            text: changes.text,
            salary_min: changes.salary_min,
            salary_max: changes.salary_max,
            published_at: Utc::now().date_naive(),
            speciality_id: changes.speciality_id,
            company_id: changes.company_id,
        };
        tables.vacancies.insert(vacancy.id, vacancy.clone());
        Ok(vacancy)
    }

    async fn update_vacancy(&self, id: i64, changes: VacancyChanges) -> Result<Vacancy> {
        let mut tables = self.tables.write().await;
        tables.check_vacancy_refs(&changes)?;
        let vacancy = tables
            .vacancies
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("vacancy {}", id)))?;
        vacancy.title = changes.title;
        vacancy.skills = changes.skills;
        vacancy.text = changes.text;
        vacancy.salary_min = changes.salary_min;
        vacancy.salary_max = changes.salary_max;
        vacancy.speciality_id = changes.speciality_id;
        vacancy.company_id = changes.company_id;
        Ok(vacancy.clone())
    }

    async fn insert_application(&self, new: NewApplication) -> Result<Application> {
        let mut tables = self.tables.write().await;
        if !tables.vacancies.contains_key(&new.vacancy_id) {
            return Err(Error::NotFound(format!("vacancy {}", new.vacancy_id)));
        }
        let application = Application {
            id: tables.allocate_id(),
            written_username: new.written_username,
            written_phone: new.written_phone,
            written_cover_letter: new.written_cover_letter,
            vacancy_id: Some(new.vacancy_id),
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        tables.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn applications_for_vacancy(&self, vacancy_id: i64) -> Result<Vec<Application>> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.vacancy_id == Some(vacancy_id))
            .cloned()
            .collect())
    }

    async fn resume_by_user(&self, user_id: i64) -> Result<Option<Resume>> {
        let tables = self.tables.read().await;
        Ok(tables
            .resumes
            .values()
            .find(|resume| resume.user_id == Some(user_id))
            .cloned())
    }

    async fn insert_resume(&self, changes: ResumeChanges) -> Result<Resume> {
        let mut tables = self.tables.write().await;
        if tables
            .resumes
            .values()
            .any(|resume| resume.user_id == Some(changes.user_id))
        {
            return Err(Error::Conflict("user already has a resume".to_string()));
        }
        let resume = Resume {
            id: tables.allocate_id(),
            name: changes.name,
            surname: changes.surname,
            status: changes.status,
            salary: changes.salary,
            grade: changes.grade,
            education: changes.education,
            experience: changes.experience,
            portfolio: changes.portfolio,
            speciality_id: changes.speciality_id,
            user_id: Some(changes.user_id),
        };
        tables.resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn update_resume(&self, id: i64, changes: ResumeChanges) -> Result<Resume> {
        let mut tables = self.tables.write().await;
        let resume = tables
            .resumes
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("resume {}", id)))?;
        resume.name = changes.name;
        resume.surname = changes.surname;
        resume.status = changes.status;
        resume.salary = changes.salary;
        resume.grade = changes.grade;
        resume.education = changes.education;
        resume.experience = changes.experience;
        resume.portfolio = changes.portfolio;
        resume.speciality_id = changes.speciality_id;
        resume.user_id = Some(changes.user_id);
        Ok(resume.clone())
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_user(&self, new: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|user| user.username == new.username) {
            return Err(Error::Conflict(format!(
                "username '{}' is already taken",
                new.username
            )));
        }
        let user = User {
            id: tables.allocate_id(),
            username: new.username,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash: new.password_hash,
            date_joined: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}
