use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    dto::{
        application_dto::ApplicationForm,
        form::Submitted,
        page_dto::{FormMode, FormView, Page},
        vacancy_dto::{SearchQuery, SentContext, VacancyDetailContext, VacancyListContext},
    },
    error::Result,
    middleware::auth::CurrentUser,
    routes::extract::parse_id,
    AppState,
};

const LIST_TEMPLATE: &str = "vacancy/vacancies.html";
const DETAIL_TEMPLATE: &str = "vacancy/vacancy.html";

#[axum::debug_handler]
pub async fn list_vacancies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.all().await?;
    Ok(Page::new(
        LIST_TEMPLATE,
        VacancyListContext::new("All vacancies", vacancies),
    ))
}

#[axum::debug_handler]
pub async fn search_vacancies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let raw = query.search.unwrap_or_default();
    let vacancies = state.vacancy_service.search(&raw).await?;
    let mut context = VacancyListContext::new("Found vacancies", vacancies);
    context.query = Some(raw);
    Ok(Page::new(LIST_TEMPLATE, context))
}

#[axum::debug_handler]
pub async fn category(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse> {
    let (speciality, vacancies) = state.vacancy_service.category(&code).await?;
    Ok(Page::new(
        LIST_TEMPLATE,
        VacancyListContext::new(speciality.title, vacancies),
    ))
}

#[axum::debug_handler]
pub async fn vacancy_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.detail(parse_id(&id)?).await?;
    Ok(Page::new(
        DETAIL_TEMPLATE,
        VacancyDetailContext {
            vacancy,
            form: FormView::new(FormMode::Create, ApplicationForm::default()),
        },
    ))
}

#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<ApplicationForm>,
) -> Result<Response> {
    let vacancy_id = parse_id(&id)?;
    match state
        .application_service
        .submit(vacancy_id, user.user_id(), &form)
        .await?
    {
        Submitted::Saved(_) => {
            Ok(Redirect::to(&format!("/vacancies/{}/send", vacancy_id)).into_response())
        }
        Submitted::Invalid(errors) => {
            let vacancy = state.vacancy_service.detail(vacancy_id).await?;
            Ok(Page::new(
                DETAIL_TEMPLATE,
                VacancyDetailContext {
                    vacancy,
                    form: FormView::new(FormMode::Create, form).with_errors(errors),
                },
            )
            .into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn sent(Path(id): Path<String>) -> Result<impl IntoResponse> {
    let vacancy_id = parse_id(&id)?;
    Ok(Page::new("vacancy/sent.html", SentContext { vacancy_id }))
}
