use std::sync::Arc;

use crate::database::Store;
use crate::dto::form::Submitted;
use crate::dto::resume_dto::ResumeForm;
use crate::error::{Error, Result};
use crate::models::resume::Resume;
use crate::models::speciality::Speciality;

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn Store>,
}

impl ResumeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn by_user(&self, user_id: i64) -> Result<Option<Resume>> {
        self.store.resume_by_user(user_id).await
    }

    /// Form values for a stored resume, exactly as they were saved.
    pub async fn form_for(&self, resume: &Resume) -> Result<ResumeForm> {
        let speciality = self
            .store
            .speciality_by_id(resume.speciality_id)
            .await?
            .ok_or_else(|| {
                Error::Internal(format!(
                    "resume {} points at missing speciality {}",
                    resume.id, resume.speciality_id
                ))
            })?;
        Ok(ResumeForm::from_resume(resume, &speciality.code))
    }

    pub async fn save_owned(
        &self,
        user_id: i64,
        form: &ResumeForm,
        specialities: &[Speciality],
    ) -> Result<Submitted<Resume>> {
        let input = match form.clean(specialities) {
            Ok(input) => input,
            Err(errors) => return Ok(Submitted::Invalid(errors)),
        };
        let changes = input.into_changes(user_id);

        let resume = match self.store.resume_by_user(user_id).await? {
            Some(existing) => {
                let resume = self.store.update_resume(existing.id, changes).await?;
                tracing::info!(resume_id = resume.id, user_id, "resume updated");
                resume
            }
            None => {
                let resume = self.store.insert_resume(changes).await?;
                tracing::info!(resume_id = resume.id, user_id, "resume created");
                resume
            }
        };
        Ok(Submitted::Saved(resume))
    }
}
