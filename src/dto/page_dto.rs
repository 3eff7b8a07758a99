use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::form::FormErrors;

/// What a page handler hands to the rendering collaborator: the template name,
/// the data it would be rendered with, and the notices for this response only.
#[derive(Debug, Clone, Serialize)]
pub struct Page<C> {
    pub template: &'static str,
    pub context: C,
    pub messages: Vec<Notice>,
}

impl<C> Page<C> {
    pub fn new(template: &'static str, context: C) -> Self {
        Self {
            template,
            context,
            messages: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.messages.push(notice);
        self
    }
}

impl Page<EmptyContext> {
    pub fn empty(template: &'static str) -> Self {
        Self::new(template, EmptyContext::default())
    }
}

impl<C: Serialize> IntoResponse for Page<C> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub extra_tags: String,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            extra_tags: "info".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit,
}

/// A form as a template sees it: which flavour of page, the current field
/// values (exactly as submitted, or the initial ones) and per-field errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormView<F> {
    pub mode: FormMode,
    pub values: F,
    pub errors: FormErrors,
}

impl<F> FormView<F> {
    pub fn new(mode: FormMode, values: F) -> Self {
        Self {
            mode,
            values,
            errors: FormErrors::default(),
        }
    }

    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Select widget option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyContext {}
