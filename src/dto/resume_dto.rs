use serde::{Deserialize, Serialize};
use validator::Validate;

use super::form::{strip, FormErrors};
use super::page_dto::{Choice, FormView};
use super::vacancy_dto::DEFAULT_SPECIALITY;
use crate::models::resume::{Grade, Resume, ResumeChanges, ResumeStatus};
use crate::models::speciality::Speciality;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ResumeForm {
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub name: String,
    #[validate(length(max = 50, message = "Ensure this value has at most 50 characters."))]
    pub surname: String,
    pub status: String,
    pub salary: String,
    pub speciality: String,
    pub grade: String,
    pub education: String,
    pub experience: String,
    #[validate(length(max = 250, message = "Ensure this value has at most 250 characters."))]
    pub portfolio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeInput {
    pub name: String,
    pub surname: String,
    pub status: ResumeStatus,
    pub salary: i32,
    pub speciality_id: i64,
    pub grade: Grade,
    pub education: String,
    pub experience: String,
    pub portfolio: String,
}

impl ResumeInput {
    pub fn into_changes(self, user_id: i64) -> ResumeChanges {
        ResumeChanges {
            name: self.name,
            surname: self.surname,
            status: self.status,
            salary: Some(self.salary),
            grade: self.grade,
            education: self.education,
            experience: self.experience,
            portfolio: self.portfolio,
            speciality_id: self.speciality_id,
            user_id,
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

impl ResumeForm {
    pub fn initial() -> Self {
        Self {
            status: ResumeStatus::LookingFor.code().to_string(),
            speciality: DEFAULT_SPECIALITY.to_string(),
            grade: Grade::Middle.code().to_string(),
            ..Self::default()
        }
    }

    pub fn from_resume(resume: &Resume, speciality_code: &str) -> Self {
        Self {
            name: resume.name.clone(),
            surname: resume.surname.clone(),
            status: resume.status.code().to_string(),
            salary: resume.salary.map(|v| v.to_string()).unwrap_or_default(),
            speciality: speciality_code.to_string(),
            grade: resume.grade.code().to_string(),
            education: resume.education.clone(),
            experience: resume.experience.clone(),
            portfolio: resume.portfolio.clone(),
        }
    }

    fn stripped(&self) -> Self {
        Self {
            name: strip(&self.name),
            surname: strip(&self.surname),
            status: strip(&self.status),
            salary: strip(&self.salary),
            speciality: strip(&self.speciality),
            grade: strip(&self.grade),
            education: strip(&self.education),
            experience: strip(&self.experience),
            portfolio: strip(&self.portfolio),
        }
    }

    pub fn clean(&self, specialities: &[Speciality]) -> Result<ResumeInput, FormErrors> {
        let form = self.stripped();
        let mut errors = FormErrors::from_validation(form.validate());
        errors.require("name", &form.name);
        errors.require("surname", &form.surname);
        let status = errors.choice("status", &form.status, ResumeStatus::from_code);
        let salary = errors.integer("salary", &form.salary, 0, true);
        let speciality_id = errors.speciality("speciality", &form.speciality, specialities);
        let grade = errors.choice("grade", &form.grade, Grade::from_code);

        if !form.portfolio.is_empty() && !is_http_url(&form.portfolio) {
            errors.add("portfolio", "Enter a valid URL.");
        }

        match (status, salary, speciality_id, grade) {
            (Some(status), Some(salary), Some(speciality_id), Some(grade)) if errors.is_empty() => {
                Ok(ResumeInput {
                    name: form.name,
                    surname: form.surname,
                    status,
                    salary,
                    speciality_id,
                    grade,
                    education: form.education,
                    experience: form.experience,
                    portfolio: form.portfolio,
                })
            }
            _ => Err(errors),
        }
    }
}

pub fn status_choices() -> Vec<Choice> {
    ResumeStatus::ALL
        .iter()
        .map(|status| Choice::new(status.code(), status.label()))
        .collect()
}

pub fn grade_choices() -> Vec<Choice> {
    Grade::ALL
        .iter()
        .map(|grade| Choice::new(grade.code(), grade.label()))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeEditContext {
    pub form: FormView<ResumeForm>,
    pub specialities: Vec<Choice>,
    pub statuses: Vec<Choice>,
    pub grades: Vec<Choice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialities() -> Vec<Speciality> {
        vec![Speciality {
            id: 7,
            code: "backend".into(),
            title: "Backend".into(),
            picture: String::new(),
        }]
    }

    fn filled() -> ResumeForm {
        ResumeForm {
            name: "Ivan".into(),
            surname: "Petrov".into(),
            status: "CONSIDERING OFFER".into(),
            salary: "90000".into(),
            speciality: "backend".into(),
            grade: "SENIOR".into(),
            education: "MSU".into(),
            experience: "5 years".into(),
            portfolio: "https://ivan.github.io".into(),
        }
    }

    #[test]
    fn cleaned_values_round_trip_through_the_form() {
        let form = filled();
        let input = form.clean(&specialities()).unwrap();
        let resume = Resume {
            id: 1,
            name: input.name.clone(),
            surname: input.surname.clone(),
            status: input.status,
            salary: Some(input.salary),
            grade: input.grade,
            education: input.education.clone(),
            experience: input.experience.clone(),
            portfolio: input.portfolio.clone(),
            speciality_id: input.speciality_id,
            user_id: Some(3),
        };
        let reloaded = ResumeForm::from_resume(&resume, "backend");
        assert_eq!(
            serde_json::to_value(&reloaded).unwrap(),
            serde_json::to_value(&form).unwrap()
        );
    }

    #[test]
    fn blank_and_legacy_choices_are_rejected() {
        let mut form = filled();
        form.status = String::new();
        form.grade = "TEAMLED".into();
        let errors = form.clean(&specialities()).unwrap_err();
        assert_eq!(errors.get("status").unwrap()[0], crate::dto::form::REQUIRED);
        assert!(errors.get("grade").unwrap()[0].contains("TEAMLED"));
    }

    #[test]
    fn text_is_stored_without_surrounding_whitespace() {
        let mut form = filled();
        form.name = "  Ivan ".into();
        form.portfolio = " https://ivan.github.io\n".into();
        let input = form.clean(&specialities()).unwrap();
        assert_eq!(input.name, "Ivan");
        assert_eq!(input.portfolio, "https://ivan.github.io");

        form.name = "   ".into();
        assert!(form.clean(&specialities()).unwrap_err().contains("name"));
    }

    #[test]
    fn rejects_bad_portfolio_and_unknown_grade() {
        let mut form = filled();
        form.portfolio = "not a link".into();
        form.grade = "GURU".into();
        let errors = form.clean(&specialities()).unwrap_err();
        assert!(errors.contains("portfolio"));
        assert!(errors.contains("grade"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn salary_is_required() {
        let mut form = filled();
        form.salary = " ".into();
        assert!(form.clean(&specialities()).unwrap_err().contains("salary"));
    }
}
