use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    dto::{
        page_dto::Page,
        vacancy_dto::{HomeContext, SearchQuery},
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn home(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let data = state.vacancy_service.home().await?;
    Ok(Page::new(
        "vacancy/index.html",
        HomeContext {
            specialities: data.specialities,
            companies: data.companies,
            search,
        },
    ))
}
