pub mod application;
pub mod company;
pub mod resume;
pub mod speciality;
pub mod user;
pub mod vacancy;
