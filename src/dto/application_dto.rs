use serde::{Deserialize, Serialize};
use validator::Validate;

use super::form::{strip, FormErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApplicationForm {
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub written_username: String,
    #[validate(length(
        min = 10,
        max = 12,
        message = "Phone number must be between 10 and 12 characters long."
    ))]
    pub written_phone: String,
    pub written_cover_letter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInput {
    pub written_username: String,
    pub written_phone: String,
    pub written_cover_letter: String,
}

impl ApplicationForm {
    fn stripped(&self) -> Self {
        Self {
            written_username: strip(&self.written_username),
            written_phone: strip(&self.written_phone),
            written_cover_letter: strip(&self.written_cover_letter),
        }
    }

    pub fn clean(&self) -> Result<ApplicationInput, FormErrors> {
        let form = self.stripped();
        let mut errors = FormErrors::from_validation(form.validate());
        errors.require("written_username", &form.written_username);
        errors.require("written_phone", &form.written_phone);
        errors.require("written_cover_letter", &form.written_cover_letter);

        errors.finish(ApplicationInput {
            written_username: form.written_username,
            written_phone: form.written_phone,
            written_cover_letter: form.written_cover_letter,
        })
    }
}
