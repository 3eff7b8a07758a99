use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    dto::{company_dto::CompanyDetailContext, page_dto::Page},
    error::Result,
    routes::extract::parse_id,
    AppState,
};

#[axum::debug_handler]
pub async fn company_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let (company, vacancies) = state.company_service.detail(parse_id(&id)?).await?;
    Ok(Page::new(
        "vacancy/company.html",
        CompanyDetailContext { company, vacancies },
    ))
}
