use serde::{Deserialize, Serialize};
use validator::Validate;

use super::form::{strip, FormErrors};
use super::page_dto::FormView;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn clean(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("username", &self.username);
        errors.require("password", &self.password);
        errors.finish(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub username: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl RegisterForm {
    /// Passwords are taken as typed.
    fn stripped(&self) -> Self {
        Self {
            username: strip(&self.username),
            first_name: strip(&self.first_name),
            last_name: strip(&self.last_name),
            email: strip(&self.email),
            password1: self.password1.clone(),
            password2: self.password2.clone(),
        }
    }

    pub fn clean(&self) -> Result<RegisterInput, FormErrors> {
        let form = self.stripped();
        let mut errors = FormErrors::from_validation(form.validate());

        if errors.require("username", &form.username)
            && !form.username.chars().all(is_username_char)
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }
        errors.require("email", &form.email);
        let have_first = errors.require("password1", &form.password1);
        let have_second = errors.require("password2", &form.password2);

        if have_first && have_second {
            if form.password1 != form.password2 {
                errors.add("password2", "The two password fields didn't match.");
            } else {
                if form.password1.chars().count() < MIN_PASSWORD_LENGTH {
                    errors.add(
                        "password2",
                        format!(
                            "This password is too short. It must contain at least {} characters.",
                            MIN_PASSWORD_LENGTH
                        ),
                    );
                }
                if form.password1.chars().all(|c| c.is_ascii_digit()) {
                    errors.add("password2", "This password is entirely numeric.");
                }
            }
        }

        errors.finish(RegisterInput {
            username: form.username,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password1,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginContext {
    pub form: FormView<LoginForm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterContext {
    pub form: FormView<RegisterForm>,
}

/// Body of a successful login; the same token is also set as a cookie.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub redirect_to: &'static str,
}
