use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    dto::{
        company_dto::{CompanyEditContext, CompanyForm},
        form::Submitted,
        page_dto::{FormMode, FormView, Notice, Page},
        vacancy_dto::{speciality_choices, OwnedVacanciesContext, VacancyEditContext, VacancyForm},
    },
    error::Result,
    middleware::auth::CurrentUser,
    models::company::Company,
    routes::{extract::{parse_id, CompanySubmission}, LOGIN_PATH},
    services::vacancy_service::OwnedVacancy,
    AppState,
};

const COMPANY_EDIT_TEMPLATE: &str = "vacancy/company-edit.html";
const VACANCY_EDIT_TEMPLATE: &str = "vacancy/vacancy-edit.html";
const VACANCY_CREATE_TEMPLATE: &str = "vacancy/vacancy-create.html";
const MY_COMPANY_PATH: &str = "/mycompany/";

/// Resolves the signed-in user's company, or the redirect to send them to.
async fn owned_company(
    state: &AppState,
    user: &CurrentUser,
) -> Result<std::result::Result<Company, Response>> {
    let Some(user_id) = user.user_id() else {
        return Ok(Err(Redirect::to(LOGIN_PATH).into_response()));
    };
    match state.company_service.by_owner(user_id).await? {
        Some(company) => Ok(Ok(company)),
        None => Ok(Err(Redirect::to(MY_COMPANY_PATH).into_response())),
    }
}

#[axum::debug_handler]
pub async fn my_company(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    match state.company_service.by_owner(user_id).await? {
        Some(_) => Ok(Redirect::to("/mycompany/edit/").into_response()),
        None => Ok(Page::empty("vacancy/company-create.html").into_response()),
    }
}

#[axum::debug_handler]
pub async fn edit_company_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let context = match state.company_service.by_owner(user_id).await? {
        Some(company) => CompanyEditContext {
            form: FormView::new(FormMode::Edit, CompanyForm::from_company(&company)),
            logo: company.logo,
        },
        None => CompanyEditContext {
            form: FormView::new(FormMode::Create, CompanyForm::initial()),
            logo: String::new(),
        },
    };
    Ok(Page::new(COMPANY_EDIT_TEMPLATE, context).into_response())
}

#[axum::debug_handler]
pub async fn save_company(
    State(state): State<AppState>,
    user: CurrentUser,
    submission: CompanySubmission,
) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let CompanySubmission { form, logo } = submission;

    match state
        .company_service
        .save_owned(user_id, &form, logo)
        .await?
    {
        Submitted::Saved(company) => {
            let context = CompanyEditContext {
                form: FormView::new(FormMode::Edit, form),
                logo: company.logo,
            };
            Ok(Page::new(COMPANY_EDIT_TEMPLATE, context)
                .with_notice(Notice::success("Company information updated"))
                .into_response())
        }
        Submitted::Invalid(errors) => {
            let existing = state.company_service.by_owner(user_id).await?;
            let mode = if existing.is_some() {
                FormMode::Edit
            } else {
                FormMode::Create
            };
            let context = CompanyEditContext {
                form: FormView::new(mode, form).with_errors(errors),
                logo: existing.map(|company| company.logo).unwrap_or_default(),
            };
            Ok(Page::new(COMPANY_EDIT_TEMPLATE, context).into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn my_vacancies(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let company = match owned_company(&state, &user).await? {
        Ok(company) => company,
        Err(redirect) => return Ok(redirect),
    };
    let vacancies = state.vacancy_service.by_company(company.id).await?;
    let empty = vacancies.is_empty();
    let mut page = Page::new(
        "vacancy/vacancy-list.html",
        OwnedVacanciesContext { company, vacancies },
    );
    if empty {
        page = page.with_notice(Notice::success(
            "You have no vacancies yet, but you can create the first one",
        ));
    }
    Ok(page.into_response())
}

async fn edit_context(
    state: &AppState,
    form: FormView<VacancyForm>,
    vacancy_id: Option<i64>,
) -> Result<VacancyEditContext> {
    let specialities = speciality_choices(&state.vacancy_service.specialities().await?);
    let (vacancy, applications) = match vacancy_id {
        Some(id) => (
            Some(state.vacancy_service.detail(id).await?),
            state.vacancy_service.applications(id).await?,
        ),
        None => (None, Vec::new()),
    };
    Ok(VacancyEditContext {
        form,
        specialities,
        vacancy,
        applications,
    })
}

#[axum::debug_handler]
pub async fn edit_vacancy_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    let company = match owned_company(&state, &user).await? {
        Ok(company) => company,
        Err(redirect) => return Ok(redirect),
    };
    let context = match state.vacancy_service.owned(&company, id).await? {
        OwnedVacancy::Existing(vacancy) => {
            let form = FormView::new(FormMode::Edit, VacancyForm::from_listing(&vacancy));
            edit_context(&state, form, Some(vacancy.id)).await?
        }
        OwnedVacancy::Missing => {
            let form = FormView::new(FormMode::Create, VacancyForm::initial());
            edit_context(&state, form, None).await?
        }
    };
    Ok(Page::new(VACANCY_EDIT_TEMPLATE, context).into_response())
}

#[axum::debug_handler]
pub async fn save_vacancy(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<VacancyForm>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    let company = match owned_company(&state, &user).await? {
        Ok(company) => company,
        Err(redirect) => return Ok(redirect),
    };
    let existing = match state.vacancy_service.owned(&company, id).await? {
        OwnedVacancy::Existing(vacancy) => Some(vacancy.id),
        OwnedVacancy::Missing => None,
    };

    match state.vacancy_service.save(&company, existing, &form).await? {
        Submitted::Saved(vacancy) => {
            let view = FormView::new(FormMode::Edit, form);
            let context = edit_context(&state, view, Some(vacancy.id)).await?;
            Ok(Page::new(VACANCY_EDIT_TEMPLATE, context)
                .with_notice(Notice::success("Vacancy updated"))
                .into_response())
        }
        Submitted::Invalid(errors) => {
            let mode = if existing.is_some() {
                FormMode::Edit
            } else {
                FormMode::Create
            };
            let view = FormView::new(mode, form).with_errors(errors);
            let context = edit_context(&state, view, existing).await?;
            Ok(Page::new(VACANCY_EDIT_TEMPLATE, context).into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn create_vacancy_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response> {
    if let Err(redirect) = owned_company(&state, &user).await? {
        return Ok(redirect);
    }
    let form = FormView::new(FormMode::Create, VacancyForm::initial());
    let context = edit_context(&state, form, None).await?;
    Ok(Page::new(VACANCY_CREATE_TEMPLATE, context).into_response())
}

#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<VacancyForm>,
) -> Result<Response> {
    let company = match owned_company(&state, &user).await? {
        Ok(company) => company,
        Err(redirect) => return Ok(redirect),
    };

    match state.vacancy_service.save(&company, None, &form).await? {
        Submitted::Saved(vacancy) => {
            let view = FormView::new(FormMode::Create, form);
            let context = edit_context(&state, view, Some(vacancy.id)).await?;
            Ok(Page::new(VACANCY_CREATE_TEMPLATE, context)
                .with_notice(Notice::success("Vacancy added"))
                .into_response())
        }
        Submitted::Invalid(errors) => {
            let view = FormView::new(FormMode::Create, form).with_errors(errors);
            let context = edit_context(&state, view, None).await?;
            Ok(Page::new(VACANCY_CREATE_TEMPLATE, context).into_response())
        }
    }
}
