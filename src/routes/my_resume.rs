use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    dto::{
        form::Submitted,
        page_dto::{FormMode, FormView, Notice, Page},
        resume_dto::{grade_choices, status_choices, ResumeEditContext, ResumeForm},
        vacancy_dto::speciality_choices,
    },
    error::Result,
    middleware::auth::CurrentUser,
    models::speciality::Speciality,
    routes::LOGIN_PATH,
    AppState,
};

const RESUME_EDIT_TEMPLATE: &str = "vacancy/resume-edit.html";

fn edit_context(form: FormView<ResumeForm>, specialities: &[Speciality]) -> ResumeEditContext {
    ResumeEditContext {
        form,
        specialities: speciality_choices(specialities),
        statuses: status_choices(),
        grades: grade_choices(),
    }
}

#[axum::debug_handler]
pub async fn my_resume(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    match state.resume_service.by_user(user_id).await? {
        Some(_) => Ok(Redirect::to("/myresume/edit/").into_response()),
        None => Ok(Page::empty("vacancy/resume-create.html").into_response()),
    }
}

#[axum::debug_handler]
pub async fn edit_resume_page(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let specialities = state.vacancy_service.specialities().await?;
    let form = match state.resume_service.by_user(user_id).await? {
        Some(resume) => FormView::new(
            FormMode::Edit,
            state.resume_service.form_for(&resume).await?,
        ),
        None => FormView::new(FormMode::Create, ResumeForm::initial()),
    };
    Ok(Page::new(RESUME_EDIT_TEMPLATE, edit_context(form, &specialities)).into_response())
}

#[axum::debug_handler]
pub async fn save_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ResumeForm>,
) -> Result<Response> {
    let Some(user_id) = user.user_id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    let specialities = state.vacancy_service.specialities().await?;

    match state
        .resume_service
        .save_owned(user_id, &form, &specialities)
        .await?
    {
        Submitted::Saved(_) => {
            let view = FormView::new(FormMode::Edit, form);
            Ok(Page::new(RESUME_EDIT_TEMPLATE, edit_context(view, &specialities))
                .with_notice(Notice::success("Your resume has been updated!"))
                .into_response())
        }
        Submitted::Invalid(errors) => {
            let mode = match state.resume_service.by_user(user_id).await? {
                Some(_) => FormMode::Edit,
                None => FormMode::Create,
            };
            let view = FormView::new(mode, form).with_errors(errors);
            Ok(Page::new(RESUME_EDIT_TEMPLATE, edit_context(view, &specialities)).into_response())
        }
    }
}
