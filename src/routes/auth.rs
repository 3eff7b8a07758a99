use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};

use crate::{
    dto::{
        account_dto::{LoginContext, LoginForm, LoginResponse, RegisterContext, RegisterForm},
        form::Submitted,
        page_dto::{FormMode, FormView, Page},
    },
    error::{Error, Result},
    middleware::auth::{cleared_cookie, session_cookie, CurrentUser},
    routes::LOGIN_PATH,
    AppState,
};

const LOGIN_TEMPLATE: &str = "vacancy/login.html";
const REGISTER_TEMPLATE: &str = "vacancy/register.html";

#[axum::debug_handler(state = AppState)]
pub async fn login_page(user: CurrentUser) -> Response {
    if user.0.is_some() {
        return Redirect::to("/").into_response();
    }
    Page::new(
        LOGIN_TEMPLATE,
        LoginContext {
            form: FormView::new(FormMode::Create, LoginForm::default()),
        },
    )
    .into_response()
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.auth_service.login(&form).await? {
        Submitted::Saved(issued) => {
            let cookie = session_cookie(&issued.token, issued.expires_in)
                .ok_or_else(|| Error::Internal("token is not a valid cookie value".into()))?;
            let body = LoginResponse {
                access_token: issued.token,
                token_type: "Bearer",
                expires_in: issued.expires_in,
                redirect_to: "/",
            };
            Ok((
                StatusCode::SEE_OTHER,
                [(header::LOCATION, "/")],
                [(header::SET_COOKIE, cookie)],
                Json(body),
            )
                .into_response())
        }
        Submitted::Invalid(errors) => Ok(Page::new(
            LOGIN_TEMPLATE,
            LoginContext {
                form: FormView::new(FormMode::Create, form).with_errors(errors),
            },
        )
        .into_response()),
    }
}

#[axum::debug_handler]
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, cleared_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

#[axum::debug_handler(state = AppState)]
pub async fn register_page(user: CurrentUser) -> Response {
    if user.0.is_some() {
        return Redirect::to("/").into_response();
    }
    Page::new(
        REGISTER_TEMPLATE,
        RegisterContext {
            form: FormView::new(FormMode::Create, RegisterForm::default()),
        },
    )
    .into_response()
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    match state.auth_service.register(&form).await? {
        Submitted::Saved(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
        Submitted::Invalid(errors) => Ok(Page::new(
            REGISTER_TEMPLATE,
            RegisterContext {
                form: FormView::new(FormMode::Create, form).with_errors(errors),
            },
        )
        .into_response()),
    }
}
