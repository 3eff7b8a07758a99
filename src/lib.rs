pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use crate::database::Store;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    company_service::CompanyService, resume_service::ResumeService,
    vacancy_service::VacancyService,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub media_root: String,
    pub vacancy_service: VacancyService,
    pub company_service: CompanyService,
    pub application_service: ApplicationService,
    pub resume_service: ResumeService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let config = crate::config::get_config();

        let vacancy_service = VacancyService::new(store.clone());
        let company_service = CompanyService::new(store.clone(), config.media_root.clone());
        let application_service = ApplicationService::new(store.clone());
        let resume_service = ResumeService::new(store.clone());
        let auth_service = AuthService::new(
            store.clone(),
            config.jwt_secret.clone(),
            config.token_ttl_minutes,
        );

        Self {
            store,
            media_root: config.media_root.clone(),
            vacancy_service,
            company_service,
            application_service,
            resume_service,
            auth_service,
        }
    }
}
