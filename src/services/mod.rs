pub mod application_service;
pub mod auth_service;
pub mod company_service;
pub mod resume_service;
pub mod seed;
pub mod vacancy_service;
