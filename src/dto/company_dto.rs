use serde::{Deserialize, Serialize};
use validator::Validate;

use super::form::{strip, FormErrors};
use super::page_dto::FormView;
use crate::models::company::{Company, DEFAULT_EMPLOYEE_COUNT};
use crate::models::vacancy::VacancyListing;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompanyForm {
    #[validate(length(max = 25, message = "Ensure this value has at most 25 characters."))]
    pub name: String,
    pub employee_count: String,
    #[validate(length(max = 25, message = "Ensure this value has at most 25 characters."))]
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInput {
    pub name: String,
    pub employee_count: i32,
    pub location: String,
    pub description: String,
}

impl CompanyForm {
    pub fn initial() -> Self {
        Self {
            employee_count: "0".to_string(),
            ..Self::default()
        }
    }

    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            employee_count: company.employee_count.to_string(),
            location: company.location.clone(),
            description: company.description.clone(),
        }
    }

    fn stripped(&self) -> Self {
        Self {
            name: strip(&self.name),
            employee_count: strip(&self.employee_count),
            location: strip(&self.location),
            description: strip(&self.description),
        }
    }

    /// A blank head count stores the column default.
    pub fn clean(&self) -> Result<CompanyInput, FormErrors> {
        let form = self.stripped();
        let mut errors = FormErrors::from_validation(form.validate());
        errors.require("name", &form.name);
        let employee_count = errors
            .integer("employee_count", &form.employee_count, 0, false)
            .unwrap_or(DEFAULT_EMPLOYEE_COUNT);

        errors.finish(CompanyInput {
            name: form.name,
            employee_count,
            location: form.location,
            description: form.description,
        })
    }
}

/// Uploaded file as received from a multipart body.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: bytes::Bytes,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyEditContext {
    pub form: FormView<CompanyForm>,
    /// Stored logo path after this request; empty when there is none.
    pub logo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetailContext {
    pub company: Company,
    pub vacancies: Vec<VacancyListing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_employee_count_uses_default() {
        let form = CompanyForm {
            name: "hirey".into(),
            employee_count: "".into(),
            location: "moscow".into(),
            description: String::new(),
        };
        assert_eq!(form.clean().unwrap().employee_count, DEFAULT_EMPLOYEE_COUNT);
    }

    #[test]
    fn name_is_required_and_bounded() {
        let mut form = CompanyForm::initial();
        assert!(form.clean().unwrap_err().contains("name"));
        form.name = "x".repeat(26);
        assert!(form.clean().unwrap_err().contains("name"));
        form.name = "x".repeat(25);
        assert_eq!(form.clean().unwrap().employee_count, 0);
    }

    #[test]
    fn padded_values_are_trimmed_before_checks() {
        let form = CompanyForm {
            name: format!(" {} ", "x".repeat(25)),
            employee_count: " 12 ".into(),
            location: "  berlin".into(),
            description: "about us\n".into(),
        };
        let input = form.clean().unwrap();
        assert_eq!(input.name, "x".repeat(25));
        assert_eq!(input.employee_count, 12);
        assert_eq!(input.location, "berlin");
        assert_eq!(input.description, "about us");
    }

    #[test]
    fn negative_employee_count_is_rejected() {
        let form = CompanyForm {
            name: "troller".into(),
            employee_count: "-3".into(),
            ..CompanyForm::default()
        };
        assert!(form.clean().unwrap_err().contains("employee_count"));
    }
}
