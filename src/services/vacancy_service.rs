use std::sync::Arc;

use crate::database::Store;
use crate::dto::form::Submitted;
use crate::dto::vacancy_dto::VacancyForm;
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::company::{Company, CompanySummary};
use crate::models::speciality::{Speciality, SpecialitySummary};
use crate::models::vacancy::{Vacancy, VacancyFilter, VacancyListing};

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn Store>,
}

pub struct HomeData {
    pub specialities: Vec<SpecialitySummary>,
    pub companies: Vec<CompanySummary>,
}

/// Where an owned-vacancy edit page lands for a given id.
pub enum OwnedVacancy {
    Existing(VacancyListing),
    Missing,
}

impl VacancyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn home(&self) -> Result<HomeData> {
        let specialities = self.store.list_specialities().await?;
        let companies = self.store.list_companies().await?;
        Ok(HomeData {
            specialities,
            companies,
        })
    }

    pub async fn all(&self) -> Result<Vec<VacancyListing>> {
        self.store.list_vacancies(VacancyFilter::All).await
    }

    /// Unknown codes and empty categories are both NotFound.
    pub async fn category(&self, code: &str) -> Result<(Speciality, Vec<VacancyListing>)> {
        let speciality = self
            .store
            .speciality_by_code(code)
            .await?
            .ok_or_else(|| Error::NotFound(format!("speciality '{}'", code)))?;
        let vacancies = self
            .store
            .list_vacancies(VacancyFilter::SpecialityCode(speciality.code.clone()))
            .await?;
        if vacancies.is_empty() {
            return Err(Error::NotFound(format!("no vacancies in '{}'", code)));
        }
        Ok((speciality, vacancies))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<VacancyListing>> {
        let query = query.trim();
        let filter = if query.is_empty() {
            VacancyFilter::All
        } else {
            VacancyFilter::Search(query.to_string())
        };
        self.store.list_vacancies(filter).await
    }

    pub async fn detail(&self, id: i64) -> Result<VacancyListing> {
        self.store
            .vacancy_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("vacancy {}", id)))
    }

    pub async fn by_company(&self, company_id: i64) -> Result<Vec<VacancyListing>> {
        self.store
            .list_vacancies(VacancyFilter::Company(company_id))
            .await
    }

    /// A vacancy that exists but belongs to someone else is NotFound.
    pub async fn owned(&self, company: &Company, id: i64) -> Result<OwnedVacancy> {
        match self.store.vacancy_by_id(id).await? {
            Some(vacancy) if vacancy.company_id == company.id => Ok(OwnedVacancy::Existing(vacancy)),
            Some(_) => Err(Error::NotFound(format!(
                "vacancy {} is not owned by company {}",
                id, company.id
            ))),
            None => Ok(OwnedVacancy::Missing),
        }
    }

    pub async fn applications(&self, vacancy_id: i64) -> Result<Vec<Application>> {
        self.store.applications_for_vacancy(vacancy_id).await
    }

    pub async fn specialities(&self) -> Result<Vec<Speciality>> {
        let summaries = self.store.list_specialities().await?;
        Ok(summaries
            .into_iter()
            .map(|s| Speciality {
                id: s.id,
                code: s.code,
                title: s.title,
                picture: s.picture,
            })
            .collect())
    }

    /// Creates a vacancy for `company` when `existing` is `None`, otherwise
    /// overwrites every writable column of that vacancy.
    pub async fn save(
        &self,
        company: &Company,
        existing: Option<i64>,
        form: &VacancyForm,
    ) -> Result<Submitted<Vacancy>> {
        let specialities = self.specialities().await?;
        let input = match form.clean(&specialities) {
            Ok(input) => input,
            Err(errors) => return Ok(Submitted::Invalid(errors)),
        };
        let changes = input.into_changes(company.id);

        let vacancy = match existing {
            Some(id) => {
                let vacancy = self.store.update_vacancy(id, changes).await?;
                tracing::info!(vacancy_id = vacancy.id, company_id = company.id, "vacancy updated");
                vacancy
            }
            None => {
                let vacancy = self.store.insert_vacancy(changes).await?;
                tracing::info!(vacancy_id = vacancy.id, company_id = company.id, "vacancy created");
                vacancy
            }
        };
        Ok(Submitted::Saved(vacancy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::company::CompanyChanges;
    use crate::models::speciality::NewSpeciality;
    use crate::models::vacancy::VacancyChanges;

    async fn fixture() -> (VacancyService, Arc<MemoryStore>, Company) {
        let store = Arc::new(MemoryStore::new());
        let backend = store
            .insert_speciality(NewSpeciality {
                code: "backend".into(),
                title: "Backend".into(),
                picture: String::new(),
            })
            .await
            .unwrap();
        store
            .insert_speciality(NewSpeciality {
                code: "design".into(),
                title: "Design".into(),
                picture: String::new(),
            })
            .await
            .unwrap();
        let company = store
            .insert_company(CompanyChanges {
                name: "workiro".into(),
                location: "london".into(),
                description: String::new(),
                logo: String::new(),
                employee_count: 10,
                owner_id: None,
            })
            .await
            .unwrap();
        store
            .insert_vacancy(VacancyChanges {
                title: "Python developer".into(),
                skills: "patience".into(),
                text: String::new(),
                salary_min: Some(1),
                salary_max: Some(2),
                speciality_id: backend.id,
                company_id: company.id,
            })
            .await
            .unwrap();
        (VacancyService::new(store.clone()), store, company)
    }

    #[tokio::test]
    async fn empty_and_unknown_categories_are_not_found() {
        let (service, _, _) = fixture().await;
        assert!(matches!(service.category("design").await, Err(Error::NotFound(_))));
        assert!(matches!(service.category("astrology").await, Err(Error::NotFound(_))));
        let (speciality, rows) = service.category("backend").await.unwrap();
        assert_eq!(speciality.title, "Backend");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn blank_search_returns_everything() {
        let (service, _, _) = fixture().await;
        assert_eq!(service.search("   ").await.unwrap().len(), 1);
        assert_eq!(service.search("PATIENCE").await.unwrap().len(), 1);
        assert!(service.search("golang").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_vacancy_is_not_found() {
        let (service, store, company) = fixture().await;
        let other = store
            .insert_company(CompanyChanges {
                name: "hirey".into(),
                location: String::new(),
                description: String::new(),
                logo: String::new(),
                employee_count: 1,
                owner_id: None,
            })
            .await
            .unwrap();
        let vacancy_id = service.all().await.unwrap()[0].id;

        assert!(matches!(
            service.owned(&company, vacancy_id).await,
            Ok(OwnedVacancy::Existing(_))
        ));
        assert!(matches!(service.owned(&other, vacancy_id).await, Err(Error::NotFound(_))));
        assert!(matches!(service.owned(&other, 9999).await, Ok(OwnedVacancy::Missing)));
    }

    #[tokio::test]
    async fn invalid_form_changes_nothing() {
        let (service, _, company) = fixture().await;
        let form = VacancyForm {
            title: String::new(),
            ..VacancyForm::initial()
        };
        let outcome = service.save(&company, None, &form).await.unwrap();
        assert!(matches!(outcome, Submitted::Invalid(_)));
        assert_eq!(service.all().await.unwrap().len(), 1);
    }
}
