use std::sync::Arc;

use crate::database::Store;
use crate::dto::company_dto::{CompanyForm, Upload};
use crate::dto::form::{FormErrors, Submitted};
use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyChanges};
use crate::models::vacancy::{VacancyFilter, VacancyListing};
use crate::utils::media;

pub const NAME_TAKEN: &str = "Company with this Name already exists.";

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn Store>,
    media_root: String,
}

impl CompanyService {
    pub fn new(store: Arc<dyn Store>, media_root: String) -> Self {
        Self { store, media_root }
    }

    pub async fn detail(&self, id: i64) -> Result<(Company, Vec<VacancyListing>)> {
        let company = self
            .store
            .company_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("company {}", id)))?;
        let vacancies = self
            .store
            .list_vacancies(VacancyFilter::Company(company.id))
            .await?;
        Ok((company, vacancies))
    }

    pub async fn by_owner(&self, owner_id: i64) -> Result<Option<Company>> {
        self.store.company_by_owner(owner_id).await
    }

    /// Creates the owner's company or overwrites the one they already have.
    /// A missing upload keeps the stored logo.
    pub async fn save_owned(
        &self,
        owner_id: i64,
        form: &CompanyForm,
        upload: Option<Upload>,
    ) -> Result<Submitted<Company>> {
        let existing = self.store.company_by_owner(owner_id).await?;
        let (input, mut errors) = match form.clean() {
            Ok(input) => (Some(input), FormErrors::new()),
            Err(errors) => (None, errors),
        };

        if !errors.contains("name") {
            if let Some(other) = self.store.company_by_name(form.name.trim()).await? {
                if existing.as_ref().map(|c| c.id) != Some(other.id) {
                    errors.add("name", NAME_TAKEN);
                }
            }
        }

        let logo_ext = match &upload {
            Some(file) => match media::image_extension(file) {
                Some(ext) => Some(ext),
                None => {
                    errors.add("logo", media::LOGO_INVALID);
                    None
                }
            },
            None => None,
        };

        let input = match input {
            Some(input) if errors.is_empty() => input,
            _ => return Ok(Submitted::Invalid(errors)),
        };

        let new_logo = match (&upload, logo_ext) {
            (Some(file), Some(ext)) => Some(media::save_logo(&self.media_root, file, ext).await?),
            _ => None,
        };
        let logo = match &new_logo {
            Some(path) => path.clone(),
            None => existing.as_ref().map(|c| c.logo.clone()).unwrap_or_default(),
        };

        let changes = CompanyChanges {
            name: input.name,
            location: input.location,
            description: input.description,
            logo,
            employee_count: input.employee_count,
            owner_id: Some(owner_id),
        };

        let created = existing.is_none();
        let written = match existing {
            Some(company) => self.store.update_company(company.id, changes).await,
            None => self.store.insert_company(changes).await,
        };
        let company = discard_on_error(&self.media_root, new_logo.as_deref(), written).await?;
        if created {
            tracing::info!(company_id = company.id, owner_id, "company created");
        } else {
            tracing::info!(company_id = company.id, owner_id, "company updated");
        }
        Ok(Submitted::Saved(company))
    }
}

/// Removes a freshly written logo when the row that would reference it was
/// not stored.
async fn discard_on_error<T>(media_root: &str, logo: Option<&str>, written: Result<T>) -> Result<T> {
    if let (Err(err), Some(path)) = (&written, logo) {
        tracing::info!(error = %err, %path, "company not saved, dropping uploaded logo");
        media::remove_logo(media_root, path).await;
    }
    written
}
