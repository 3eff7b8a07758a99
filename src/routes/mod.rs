pub mod auth;
pub mod companies;
pub mod extract;
pub mod health;
pub mod home;
pub mod my_company;
pub mod my_resume;
pub mod vacancies;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::{
    error::{plain_text, Error, SERVER_ERROR_BODY},
    AppState,
};

pub const LOGIN_PATH: &str = "/login/";

const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

async fn not_found() -> Response {
    Error::NotFound("no route".to_string()).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
}

pub fn router(state: AppState) -> Router {
    let media_root = state.media_root.clone();

    let pages = Router::new()
        .route("/", get(home::home))
        .route("/vacancies/", get(vacancies::list_vacancies))
        .route("/vacancies/search/", get(vacancies::search_vacancies))
        .route("/vacancies/cat/:code", get(vacancies::category))
        .route(
            "/vacancies/:id/",
            get(vacancies::vacancy_detail).post(vacancies::apply),
        )
        .route("/vacancies/:id/send", get(vacancies::sent))
        .route("/companies/:id/", get(companies::company_detail))
        .route("/myresume/", get(my_resume::my_resume))
        .route(
            "/myresume/edit/",
            get(my_resume::edit_resume_page).post(my_resume::save_resume),
        )
        .route("/mycompany/", get(my_company::my_company))
        .route(
            "/mycompany/edit/",
            get(my_company::edit_company_page).post(my_company::save_company),
        )
        .route("/mycompany/vacancies/", get(my_company::my_vacancies))
        .route(
            "/mycompany/vacancies/create/",
            get(my_company::create_vacancy_page).post(my_company::create_vacancy),
        )
        .route(
            "/mycompany/vacancies/:id",
            get(my_company::edit_vacancy_page).post(my_company::save_vacancy),
        )
        .route("/login/", get(auth::login_page).post(auth::login))
        .route("/logout/", get(auth::logout).post(auth::logout))
        .route(
            "/registration/",
            get(auth::register_page).post(auth::register),
        );

    Router::new()
        .route("/health", get(health::health))
        .merge(pages)
        .nest_service("/media", ServeDir::new(media_root))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}
