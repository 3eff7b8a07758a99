use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};

use crate::dto::company_dto::{CompanyForm, Upload};
use crate::error::{Error, Result};

/// Path ids that are not integers resolve like missing rows.
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::NotFound(format!("'{}' is not an id", raw)))
}

/// Company edit body: urlencoded fields, or multipart fields plus an optional
/// `logo` file. A file part with no name or no bytes counts as no upload.
pub struct CompanySubmission {
    pub form: CompanyForm,
    pub logo: Option<Upload>,
}

#[async_trait]
impl<S> FromRequest<S> for CompanySubmission
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let Form(form) = Form::<CompanyForm>::from_request(req, state)
                .await
                .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
            return Ok(Self { form, logo: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        let mut form = CompanyForm::default();
        let mut logo = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "logo" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    logo = Some(Upload { file_name, bytes });
                }
                continue;
            }
            let value = field.text().await?;
            match name.as_str() {
                "name" => form.name = value,
                "employee_count" => form.employee_count = value,
                "location" => form.location = value,
                "description" => form.description = value,
                _ => {}
            }
        }

        Ok(Self { form, logo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(Error::NotFound(_))));
        assert!(matches!(parse_id("-"), Err(Error::NotFound(_))));
    }
}
