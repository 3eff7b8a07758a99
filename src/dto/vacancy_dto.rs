use serde::{Deserialize, Serialize};
use validator::Validate;

use super::application_dto::ApplicationForm;
use super::form::{strip, FormErrors};
use super::page_dto::{Choice, FormView};
use crate::models::application::Application;
use crate::models::company::{Company, CompanySummary};
use crate::models::speciality::{Speciality, SpecialitySummary};
use crate::models::vacancy::{VacancyChanges, VacancyListing};

pub const DEFAULT_SPECIALITY: &str = "backend";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VacancyForm {
    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub title: String,
    pub speciality: String,
    pub salary_min: String,
    pub salary_max: String,
    #[validate(length(max = 500, message = "Ensure this value has at most 500 characters."))]
    pub skills: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyInput {
    pub title: String,
    pub speciality_id: i64,
    pub salary_min: i32,
    pub salary_max: i32,
    pub skills: String,
    pub text: String,
}

impl VacancyInput {
    pub fn into_changes(self, company_id: i64) -> VacancyChanges {
        VacancyChanges {
            title: self.title,
            skills: self.skills,
            text: self.text,
            salary_min: Some(self.salary_min),
            salary_max: Some(self.salary_max),
            speciality_id: self.speciality_id,
            company_id,
        }
    }
}

impl VacancyForm {
    pub fn initial() -> Self {
        Self {
            speciality: DEFAULT_SPECIALITY.to_string(),
            ..Self::default()
        }
    }

    pub fn from_listing(vacancy: &VacancyListing) -> Self {
        Self {
            title: vacancy.title.clone(),
            speciality: vacancy.speciality_code.clone(),
            salary_min: vacancy.salary_min.map(|v| v.to_string()).unwrap_or_default(),
            salary_max: vacancy.salary_max.map(|v| v.to_string()).unwrap_or_default(),
            skills: vacancy.skills.clone(),
            text: vacancy.text.clone(),
        }
    }

    fn stripped(&self) -> Self {
        Self {
            title: strip(&self.title),
            speciality: strip(&self.speciality),
            salary_min: strip(&self.salary_min),
            salary_max: strip(&self.salary_max),
            skills: strip(&self.skills),
            text: strip(&self.text),
        }
    }

    pub fn clean(&self, specialities: &[Speciality]) -> Result<VacancyInput, FormErrors> {
        let form = self.stripped();
        let mut errors = FormErrors::from_validation(form.validate());
        errors.require("title", &form.title);
        let speciality_id = errors.speciality("speciality", &form.speciality, specialities);
        let salary_min = errors.integer("salary_min", &form.salary_min, 1, true);
        let salary_max = errors.integer("salary_max", &form.salary_max, 1, true);

        if let (Some(low), Some(high)) = (salary_min, salary_max) {
            if high < low {
                errors.add(
                    "salary_max",
                    "Maximum salary must not be less than the minimum salary.",
                );
            }
        }

        match (speciality_id, salary_min, salary_max) {
            (Some(speciality_id), Some(salary_min), Some(salary_max)) if errors.is_empty() => {
                Ok(VacancyInput {
                    title: form.title,
                    speciality_id,
                    salary_min,
                    salary_max,
                    skills: form.skills,
                    text: form.text,
                })
            }
            _ => Err(errors),
        }
    }
}

pub fn speciality_choices(specialities: &[Speciality]) -> Vec<Choice> {
    specialities
        .iter()
        .map(|speciality| Choice::new(speciality.code.clone(), speciality.title.clone()))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    pub specialities: Vec<SpecialitySummary>,
    pub companies: Vec<CompanySummary>,
    pub search: SearchQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyListContext {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub count: usize,
    pub vacancies: Vec<VacancyListing>,
}

impl VacancyListContext {
    pub fn new(title: impl Into<String>, vacancies: Vec<VacancyListing>) -> Self {
        Self {
            title: title.into(),
            query: None,
            count: vacancies.len(),
            vacancies,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyDetailContext {
    pub vacancy: VacancyListing,
    pub form: FormView<ApplicationForm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentContext {
    pub vacancy_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnedVacanciesContext {
    pub company: Company,
    pub vacancies: Vec<VacancyListing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VacancyEditContext {
    pub form: FormView<VacancyForm>,
    pub specialities: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy: Option<VacancyListing>,
    pub applications: Vec<Application>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialities() -> Vec<Speciality> {
        vec![
            Speciality {
                id: 1,
                code: "backend".into(),
                title: "Backend".into(),
                picture: String::new(),
            },
            Speciality {
                id: 2,
                code: "design".into(),
                title: "Design".into(),
                picture: String::new(),
            },
        ]
    }

    fn valid() -> VacancyForm {
        VacancyForm {
            title: "Rust engineer".into(),
            speciality: "design".into(),
            salary_min: "100000".into(),
            salary_max: "150000".into(),
            skills: "tokio".into(),
            text: "".into(),
        }
    }

    #[test]
    fn valid_form_resolves_speciality() {
        let input = valid().clean(&specialities()).unwrap();
        assert_eq!(input.speciality_id, 2);
        assert_eq!(input.salary_min, 100000);
    }

    #[test]
    fn salaries_must_be_positive_and_ordered() {
        let mut form = valid();
        form.salary_min = "0".into();
        assert!(form.clean(&specialities()).unwrap_err().contains("salary_min"));

        let mut form = valid();
        form.salary_min = "200".into();
        form.salary_max = "100".into();
        assert!(form.clean(&specialities()).unwrap_err().contains("salary_max"));

        let mut form = valid();
        form.salary_max = String::new();
        assert!(form.clean(&specialities()).unwrap_err().contains("salary_max"));
    }

    #[test]
    fn unknown_speciality_is_an_invalid_choice() {
        let mut form = valid();
        form.speciality = "astrology".into();
        let errors = form.clean(&specialities()).unwrap_err();
        assert!(errors.get("speciality").unwrap()[0].contains("astrology"));
    }

    #[test]
    fn title_is_trimmed_and_blank_titles_are_required() {
        let mut form = valid();
        form.title = "  Rust engineer ".into();
        form.speciality = " design".into();
        assert_eq!(form.clean(&specialities()).unwrap().title, "Rust engineer");

        form.title = "   ".into();
        assert!(form.clean(&specialities()).unwrap_err().contains("title"));
    }

    #[test]
    fn initial_form_preselects_backend() {
        assert_eq!(VacancyForm::initial().speciality, "backend");
    }
}
