use std::sync::Arc;

use crate::database::Store;
use crate::dto::application_dto::ApplicationForm;
use crate::dto::form::Submitted;
use crate::error::{Error, Result};
use crate::models::application::{Application, NewApplication};

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Store>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Files an application against `vacancy_id`. `user_id` is `None` for
    /// anonymous applicants.
    pub async fn submit(
        &self,
        vacancy_id: i64,
        user_id: Option<i64>,
        form: &ApplicationForm,
    ) -> Result<Submitted<Application>> {
        if self.store.vacancy_by_id(vacancy_id).await?.is_none() {
            return Err(Error::NotFound(format!("vacancy {}", vacancy_id)));
        }
        let input = match form.clean() {
            Ok(input) => input,
            Err(errors) => return Ok(Submitted::Invalid(errors)),
        };

        let application = self
            .store
            .insert_application(NewApplication {
                written_username: input.written_username,
                written_phone: input.written_phone,
                written_cover_letter: input.written_cover_letter,
                vacancy_id,
                user_id,
            })
            .await?;
        tracing::info!(
            application_id = application.id,
            vacancy_id,
            user_id = ?user_id,
            "application submitted"
        );
        Ok(Submitted::Saved(application))
    }
}
